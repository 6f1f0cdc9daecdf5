//! Test utilities for cache-replace
//!
//! This crate provides shared testing utilities used across the cache-replace workspace.

mod fixtures;
mod mock;

pub use fixtures::{sample_partials_dir, write_partial};
pub use mock::{FailingRenderer, RecordingRenderer, RenderCall};
