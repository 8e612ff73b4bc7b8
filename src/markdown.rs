//! Markdown rendering for the question editor dialect.
//!
//! Rendering runs in two stages. The block and inline tokenizers turn
//! source text into [`Block`] and [`Inline`] nodes with literal text kept
//! raw; [`MarkdownRenderer`] then builds escaped HTML from the nodes with
//! one function per variant. The dialect covers headings (levels 1 to 3),
//! bold, italic, inline and fenced code, links, simple lists, horizontal
//! rules and paragraph breaks.

mod block;
mod highlight;
mod inline;
mod links;
mod renderer;

pub use block::{Block, ListKind, parse};
pub use highlight::{Highlighter, available_themes, check_theme, theme_css};
pub use inline::{Inline, parse_inline};
pub use links::sanitize_url;
pub use renderer::MarkdownRenderer;
