//! `cache-replace.toml` configuration

pub mod consts;
mod model;

pub use model::{Config, PartialsConfig};
