//! Preview page generation

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::metadata::document_header;
use crate::components::panes::{preview_pane, source_pane};
use crate::config::ViewMode;
use crate::markdown::MarkdownRenderer;

/// Stylesheets linked from the preview page, relative to the page.
pub const STYLESHEETS: &[&str] = &[
    "assets/preview.css",
    "assets/markdown.css",
    "assets/highlight.css",
];

/// Data container for preview page generation.
pub struct PreviewPageData<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub view: ViewMode,
}

/// Generates standalone preview page for markdown source
///
/// Renders the source with the given renderer and lays out the panes
/// selected by the view mode. Empty output shows the preview placeholder.
///
/// # Arguments
///
/// * `renderer`: Markdown renderer to use for the preview pane
/// * `data`: Page title, markdown source and view mode
///
/// # Returns
///
/// Complete HTML document
///
/// # Examples
///
/// ```
/// use qcmark::MarkdownRenderer;
/// use qcmark::pages::preview::{PreviewPageData, generate};
/// use qcmark::ViewMode;
///
/// let renderer = MarkdownRenderer::without_highlighting();
/// let page = generate(&renderer, PreviewPageData {
///     title: "Question 1",
///     source: "**Which** option?",
///     view: ViewMode::Preview,
/// });
/// assert!(page.into_string().contains("<strong>Which</strong>"));
/// ```
pub fn generate(renderer: &MarkdownRenderer, data: PreviewPageData<'_>) -> Markup {
    let rendered = if data.view.shows_preview() {
        renderer.render(data.source)
    } else {
        String::new()
    };

    page_wrapper(
        data.title,
        STYLESHEETS,
        data.view.css_class(),
        html! {
            (document_header(data.title, data.source))
            main class="panes" {
                @if data.view.shows_source() {
                    (source_pane(data.source))
                }
                @if data.view.shows_preview() {
                    (preview_pane(&rendered))
                }
            }
        },
    )
}
