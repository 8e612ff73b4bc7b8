//! Reusable HTML components for page generation
//!
//! Maud component functions for the preview page: the document wrapper,
//! the editor panes and the metadata strip.

pub mod layout;
pub mod metadata;
pub mod panes;
