//! Page generation modules
//!
//! Each page module builds a complete HTML document from shared components.

pub mod preview;
