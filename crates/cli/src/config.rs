use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use tocsplit_core::config::load_dotenv;
use tocsplit_core::Config;

use crate::cli::CliArgs;

/// Return the default config file path: ~/.config/tocsplit/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tocsplit").join("config.toml"))
}

/// Build the effective configuration.
///
/// Priority: command line > environment (`.env` included) > config file > defaults.
/// An explicit `--config` path must exist; the default path is optional.
pub fn load(args: &CliArgs) -> Result<Config> {
    load_dotenv();

    let file_config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config");
                Config::from_file(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?
            }
            _ => {
                debug!("Config file not found, using defaults");
                Config::default()
            }
        },
    };

    let mut config = file_config.with_env();
    apply_args(&mut config, args);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn apply_args(config: &mut Config, args: &CliArgs) {
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.output.prefix = prefix.clone();
    }
    if let Some(pages) = args.toc_pages {
        config.extract.max_toc_pages = pages;
    }
    if let Some(depth) = args.depth {
        config.extract.target_depth = depth;
    }
}
