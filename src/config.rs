//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::markdown::{MarkdownRenderer, check_theme};

/// Input path meaning "read from standard input".
const STDIN_PATH: &str = "-";

/// Command line configuration for qcmark.
#[derive(Debug, Clone, Parser)]
#[command(name = "qcmark", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render markdown to an HTML fragment
    Render(RenderArgs),
    /// Build a standalone preview page
    Preview(PreviewArgs),
}

/// Options shared by every subcommand that reads markdown.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Markdown file, or `-` for standard input
    #[arg(default_value = STDIN_PATH)]
    pub input: PathBuf,

    /// Emit fenced code blocks as plain text
    #[arg(long)]
    pub no_highlight: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file (defaults to standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,

    /// Which panes the page shows
    #[arg(long, value_enum, default_value_t = ViewMode::Split)]
    pub view: ViewMode,

    /// Code highlighting theme (InspiredGitHub, base16-ocean.dark, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,

    /// Do not open the generated page in a browser
    #[arg(long)]
    pub no_open: bool,
}

/// Editor pane layout for the preview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// Escaped markdown source only
    Source,
    /// Rendered output only
    Preview,
    /// Source and rendered output side by side
    #[default]
    Split,
}

impl ViewMode {
    /// Whether the rendered pane is visible.
    pub fn shows_preview(&self) -> bool {
        matches!(self, ViewMode::Preview | ViewMode::Split)
    }

    /// Whether the source pane is visible.
    pub fn shows_source(&self) -> bool {
        matches!(self, ViewMode::Source | ViewMode::Split)
    }

    /// CSS modifier class for the page body.
    pub fn css_class(&self) -> &'static str {
        match self {
            ViewMode::Source => "view-source",
            ViewMode::Preview => "view-preview",
            ViewMode::Split => "view-split",
        }
    }
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist, the preview output
    /// path exists and is not a directory, or the theme is not bundled.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Render(args) => args.source.validate(),
            Command::Preview(args) => {
                args.source.validate()?;
                if args.output.exists() && !args.output.is_dir() {
                    bail!(
                        "Output path is not a directory: {}",
                        args.output.display()
                    );
                }
                check_theme(&args.theme)
            }
        }
    }
}

impl SourceArgs {
    /// Whether input comes from standard input.
    pub fn is_stdin(&self) -> bool {
        self.input == Path::new(STDIN_PATH)
    }

    fn validate(&self) -> Result<()> {
        if !self.is_stdin() && !self.input.is_file() {
            bail!("Input file does not exist: {}", self.input.display());
        }
        Ok(())
    }

    /// Reads the markdown source from the input file or standard input.
    ///
    /// # Errors
    ///
    /// Returns error if reading fails or the input is not valid UTF8.
    pub fn read_source(&self) -> Result<String> {
        if self.is_stdin() {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read markdown from stdin")?;
            return Ok(source);
        }

        std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input: {}", self.input.display()))
    }

    /// Builds the renderer these options ask for.
    pub fn renderer(&self) -> MarkdownRenderer {
        if self.no_highlight {
            MarkdownRenderer::without_highlighting()
        } else {
            MarkdownRenderer::new()
        }
    }
}

impl PreviewArgs {
    /// Returns page title from configuration or the input file stem.
    pub fn page_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        if self.source.is_stdin() {
            return "Preview".to_string();
        }

        self.source
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Preview")
            .to_string()
    }
}
