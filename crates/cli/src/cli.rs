use std::path::PathBuf;

use clap::Parser;

/// Split a PDF manual into one file per section, using its table of contents.
///
/// Section start pages are read from the TOC, corrected for unnumbered front
/// matter, and confirmed against the headings in the body.
#[derive(Parser, Debug)]
#[command(name = "tocsplit", version, about = "Split a document into sections using its table of contents")]
pub struct CliArgs {
    /// Document to split: a PDF, or plain text with form-feed page breaks
    pub document: PathBuf,

    /// Only show or write the first N sections (N >= 1)
    #[arg(long = "max", value_name = "N", value_parser = parse_limit)]
    pub max: Option<usize>,

    /// Preview detected sections without writing any files
    #[arg(long)]
    pub show: bool,

    /// Directory for the section files (default: chapters)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name prefix for the section files
    #[arg(long, value_name = "TAG")]
    pub prefix: Option<String>,

    /// Path to config file (default: ~/.config/tocsplit/config.toml)
    #[arg(long, value_name = "PATH", env = "TOCSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Number of leading pages scanned for TOC lines
    #[arg(long, value_name = "P")]
    pub toc_pages: Option<usize>,

    /// Section depth to split at (1 = "1.2", 2 = "1.2.3")
    #[arg(long, value_name = "D")]
    pub depth: Option<usize>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1; omit --max to process every section".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
