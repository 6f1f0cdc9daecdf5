//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cache-replace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to cache-replace.toml (defaults to ./cache-replace.toml if present)
    #[arg(short, long, global = true, env = "CACHE_REPLACE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the marker to embed for each placeholder name
    Marker {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Render a partial and substitute its markers
    Render(RenderArgs),

    /// Write a default cache-replace.toml
    Init {
        /// Partials directory to record in the config
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Partial name (e.g. "card" or "users/row")
    pub partial: String,

    /// Partials directory, overrides the config
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Template local, repeatable (key=value)
    #[arg(short, long = "local", value_name = "KEY=VALUE")]
    pub locals: Vec<String>,

    /// Render a partial into its marker, repeatable
    #[arg(short, long = "replace", value_name = "NAME", conflicts_with_all = ["set", "each"])]
    pub replace: Vec<String>,

    /// Replace a marker with literal text, repeatable (name=value)
    #[arg(short, long = "set", value_name = "NAME=VALUE", conflicts_with = "each")]
    pub set: Vec<String>,

    /// JSON file holding an array of items to expand the partial over
    #[arg(long, requires = "each")]
    pub collection: Option<PathBuf>,

    /// Per-item replacement from a JSON pointer, repeatable (name=/pointer)
    #[arg(short, long = "each", value_name = "NAME=POINTER", requires = "collection")]
    pub each: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
