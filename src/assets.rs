//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::markdown::theme_css;

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const PANES: &str = include_str!("../assets/components/panes.css");

const PREVIEW_PAGE: &str = include_str!("../assets/page-preview.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Writes all bundled CSS assets to output directory
///
/// Produces `preview.css` and `markdown.css` from the bundled sources and
/// `highlight.css` from the named syntect theme.
///
/// # Errors
///
/// Returns error if the theme is unknown or a file cannot be written
pub fn write_css_assets(assets_dir: &Path, theme: &str) -> Result<()> {
    write_bundled(assets_dir, "preview.css", &[BASE, LAYOUT, PANES, PREVIEW_PAGE])?;
    write_bundled(assets_dir, "markdown.css", &[MARKDOWN])?;

    let highlight = theme_css(theme)?;
    write_bundled(assets_dir, "highlight.css", &[highlight.as_str()])?;
    Ok(())
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
