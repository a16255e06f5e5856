mod cli;
mod config;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tocsplit_ingest::{open_pages, DocumentKind, PdfWriter, TextWriter};
use tocsplit_segment::Pipeline;

use crate::cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr so --json output stays parseable
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let document = &args.document;
    if !document.exists() {
        bail!("{} not found", document.display());
    }
    let kind = DocumentKind::from_path(document)
        .with_context(|| format!("cannot split {}", document.display()))?;

    let mut config = config::load(&args).context("failed to load configuration")?;
    if kind == DocumentKind::Text {
        config.output.extension = kind.extension().to_string();
    }
    config.log_summary();

    info!(path = %document.display(), "Analyzing document");
    let pages = open_pages(document)
        .with_context(|| format!("failed to open {}", document.display()))?;

    let pipeline = Pipeline::new(config);
    let resolution = pipeline
        .resolve(pages.as_ref())
        .with_context(|| format!("failed to find sections in {}", document.display()))?;
    let output = &pipeline.config().output;

    if args.show {
        if args.json {
            let value = report::preview_json(document, &resolution, pipeline.config(), args.max);
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", report::preview(&resolution, output, args.max));
        }
        return Ok(());
    }

    let split = match kind {
        DocumentKind::Pdf => pipeline.split(&resolution, document, &PdfWriter, args.max),
        DocumentKind::Text => pipeline.split(&resolution, document, &TextWriter, args.max),
    }
    .with_context(|| format!("failed to write sections to {}", output.dir.display()))?;

    if args.json {
        let value = report::split_json(&split, &resolution, pipeline.config());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", report::split_summary(&split, output));
    }

    Ok(())
}
