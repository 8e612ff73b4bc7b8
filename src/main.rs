use anyhow::{Context, Result};
use log::{info, warn};
use qcmark::pages::preview::{self, PreviewPageData};
use qcmark::{Command, Config, PreviewArgs, RenderArgs};
use std::fs;
use std::io::Write;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Render(args) => render(args),
        Command::Preview(args) => generate_preview(args),
    }
}

/// Renders markdown to a fragment on stdout or in the output file.
fn render(args: &RenderArgs) -> Result<()> {
    let source = args.source.read_source()?;
    let html = args.source.renderer().render(&source);

    match &args.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!("Wrote {} bytes to {}", html.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Writes the preview page and its stylesheets, then opens the page.
fn generate_preview(args: &PreviewArgs) -> Result<()> {
    let source = args.source.read_source()?;
    let renderer = args.source.renderer();
    let title = args.page_title();

    fs::create_dir_all(&args.output).context("Failed to create output directory")?;

    let assets_dir = args.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    qcmark::write_css_assets(&assets_dir, &args.theme).context("Failed to write CSS assets")?;

    let page = preview::generate(
        &renderer,
        PreviewPageData {
            title: &title,
            source: &source,
            view: args.view,
        },
    );

    let index_path = args.output.join("index.html");
    fs::write(&index_path, page.into_string()).context("Failed to write index.html")?;
    println!("Generated: {}", index_path.display());

    if !args.no_open
        && let Err(e) = open::that(&index_path)
    {
        warn!("Failed to open {} in browser: {}", index_path.display(), e);
    }

    Ok(())
}
