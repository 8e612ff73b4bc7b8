//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, html, head, and container structure. The
/// wrapper handles viewport configuration, charset, and stylesheet loading
/// while the caller provides page-specific body content.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `stylesheets`: Array of CSS file paths to include
/// * `body_class`: CSS class applied to the body element
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, stylesheets: &[&str], body_class: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - QC Auditor" }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body class=(body_class) {
                div class="container" {
                    (body)
                }
                (footer())
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="page-footer" {
            "Generated by qcmark " (env!("CARGO_PKG_VERSION"))
        }
    }
}
