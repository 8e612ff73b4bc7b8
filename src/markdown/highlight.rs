//! Fenced code block highlighting with syntect.

use anyhow::{Context, Result, bail};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// CSS class style shared by generated spans and generated theme CSS.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Highlights code blocks into `<span class="hl-*">` markup.
pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    /// Loads the bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlights code for the given language tag.
    ///
    /// The tag is matched by syntax token first and file extension second,
    /// so both `rust` and `rs` resolve.
    ///
    /// # Returns
    ///
    /// Highlighted HTML, or `None` when the language is unknown and the
    /// caller should emit escaped plain text instead
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails to parse a line
    pub fn highlight(&self, code: &str, language: &str) -> Result<Option<String>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language));

        let Some(syntax) = syntax else {
            return Ok(None);
        };

        if code.is_empty() {
            return Ok(Some(String::new()));
        }

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .with_context(|| format!("Failed to highlight {} code line", language))?;
        }

        Ok(Some(generator.finalize()))
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the bundled highlight themes, sorted.
pub fn available_themes() -> Vec<String> {
    let mut names: Vec<String> = ThemeSet::load_defaults().themes.into_keys().collect();
    names.sort_unstable();
    names
}

/// Fails with the list of bundled themes unless `theme_name` is one of them.
///
/// # Errors
///
/// Returns error naming the available themes if the theme is unknown
pub fn check_theme(theme_name: &str) -> Result<()> {
    let names = available_themes();
    if names.iter().any(|name| name == theme_name) {
        return Ok(());
    }
    bail!(
        "Unknown theme '{}', available: {}",
        theme_name,
        names.join(", ")
    )
}

/// Generates the stylesheet that colors `hl-*` spans for a bundled theme.
///
/// # Arguments
///
/// * `theme_name`: Name of a syntect default theme (InspiredGitHub,
///   base16-ocean.dark, Solarized (light), ...)
///
/// # Errors
///
/// Returns error if the theme does not exist or CSS generation fails
pub fn theme_css(theme_name: &str) -> Result<String> {
    check_theme(theme_name)?;
    let themes = ThemeSet::load_defaults();
    let theme = themes
        .themes
        .get(theme_name)
        .with_context(|| format!("Theme disappeared from bundle: {}", theme_name))?;

    css_for_theme_with_class_style(theme, CLASS_STYLE)
        .with_context(|| format!("Failed to generate CSS for theme: {}", theme_name))
}
