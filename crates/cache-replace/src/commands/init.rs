//! Init command - write a starter cache-replace.toml

use anyhow::{Result, bail};
use cache_replace_core::config::{Config, consts::CONFIG_FILE_NAME};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

/// Write a default config
///
/// # Arguments
///
/// * `dir` - Partials directory to record, relative to the config file
/// * `force` - Overwrite an existing config
/// * `config` - Target path, defaults to ./cache-replace.toml
/// * `verbose` - Print the written settings if true
pub fn run(
    dir: Option<PathBuf>,
    force: bool,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let path = match config {
        Some(path) => path,
        None => env::current_dir()?.join(CONFIG_FILE_NAME),
    };

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut settings = Config::default();
    if let Some(dir) = dir {
        settings.partials.dir = dir;
    }
    settings.to_file(&path)?;

    println!("{} Created {}", "✓".green().bold(), path.display());
    if verbose {
        println!(
            "{} Partials: {}/{}<name>.{}",
            "→".cyan(),
            settings.partials.dir.display(),
            settings.partials.prefix,
            settings.partials.extension
        );
    }

    Ok(())
}
