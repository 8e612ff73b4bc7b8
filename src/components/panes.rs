//! Editor pane components

use maud::{Markup, PreEscaped, html};

/// Text shown in the preview pane while there is nothing to render.
pub const PREVIEW_PLACEHOLDER: &str = "Preview will appear here";

/// Renders the source pane
///
/// Shows the markdown source escaped inside a `<pre>` block.
///
/// # Arguments
///
/// * `source`: Raw markdown source
///
/// # Returns
///
/// Source pane markup
pub fn source_pane(source: &str) -> Markup {
    html! {
        section class="pane pane-source" {
            h2 class="pane-title" { "Source" }
            pre class="source-text" { (source) }
        }
    }
}

/// Renders the preview pane
///
/// Injects already rendered markdown HTML. When the rendered output is
/// empty (or whitespace only) the placeholder text is shown instead.
///
/// # Arguments
///
/// * `rendered`: HTML fragment from `MarkdownRenderer::render`
///
/// # Returns
///
/// Preview pane markup
pub fn preview_pane(rendered: &str) -> Markup {
    html! {
        section class="pane pane-preview" {
            h2 class="pane-title" { "Preview" }
            @if rendered.trim().is_empty() {
                p class="preview-placeholder" { (PREVIEW_PLACEHOLDER) }
            } @else {
                div class="markdown-body" { (PreEscaped(rendered)) }
            }
        }
    }
}
