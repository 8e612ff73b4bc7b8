//! Document metadata components

use maud::{Markup, html};

use crate::util::{format_file_size, format_word_count, word_count};

/// Renders the page header with title and source statistics
///
/// Shows the document title and a strip with the source size and word
/// count, mirroring the status line under the question editor.
///
/// # Arguments
///
/// * `title`: Document title
/// * `source`: Raw markdown source
///
/// # Returns
///
/// Header markup
pub fn document_header(title: &str, source: &str) -> Markup {
    html! {
        header class="doc-header" {
            h1 class="doc-title" { (title) }
            div class="doc-meta" {
                span class="doc-size" { (format_file_size(source.len())) }
                span class="doc-separator" { "·" }
                span class="doc-words" { (format_word_count(word_count(source))) }
            }
        }
    }
}
