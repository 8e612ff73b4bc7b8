//! Renderer for the QC Auditor question markdown dialect.
//!
//! Turns question and answer text written in a small markdown dialect into
//! escaped HTML, and builds standalone preview pages around the result.

mod assets;
pub mod components;
mod config;
pub mod markdown;
pub mod pages;
mod util;

pub use assets::write_css_assets;
pub use config::{Command, Config, PreviewArgs, RenderArgs, SourceArgs, ViewMode};
pub use markdown::{Block, Inline, MarkdownRenderer, parse, parse_inline, sanitize_url};
pub use util::{format_file_size, word_count};
