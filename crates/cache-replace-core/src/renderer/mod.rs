//! Bundled partial renderers
//!
//! Both renderers interpolate locals into the partial source with the
//! [`template`](crate::template) engine. Fragment caching is left to the
//! caller.

mod directory;
mod memory;

pub use directory::DirectoryRenderer;
pub use memory::MemoryRenderer;

use crate::error::CacheReplaceError;
use crate::render::Locals;

/// Interpolate locals into a partial source
fn interpolate(partial: &str, source: &str, locals: &Locals) -> crate::Result<String> {
    crate::template::render(source, locals).map_err(|source| CacheReplaceError::Template {
        partial: partial.to_string(),
        source,
    })
}
