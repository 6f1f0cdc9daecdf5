//! Configuration context for CLI commands

use anyhow::Result;
use cache_replace_core::config::{consts::CONFIG_FILE_NAME, Config};
use std::env;
use std::path::{Path, PathBuf};

/// Loaded configuration with paths resolved against its location
pub struct Context {
    pub config: Config,
    /// File the config was read from, if any
    pub source: Option<PathBuf>,
    pub verbose: bool,
}

impl Context {
    /// Load the config given on the command line, else ./cache-replace.toml if
    /// present, else defaults
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit config file is missing
    /// - The config file cannot be parsed or fails validation
    pub fn new(explicit: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;

        let path = match explicit {
            Some(path) => Some(path),
            None => Some(current_dir.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };

        let Some(path) = path else {
            return Ok(Self {
                config: Config::default(),
                source: None,
                verbose,
            });
        };

        let mut config = Config::from_file(&path)?;
        config.partials.dir = resolve_relative(&path, &config.partials.dir);
        tracing::debug!(path = %path.display(), "loaded config");

        Ok(Self {
            config,
            source: Some(path),
            verbose,
        })
    }
}

/// Relative partial directories are relative to the config file
fn resolve_relative(config_path: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match config_path.parent() {
        Some(parent) => parent.join(dir),
        None => dir.to_path_buf(),
    }
}
