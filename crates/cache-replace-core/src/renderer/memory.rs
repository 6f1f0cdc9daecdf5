use super::interpolate;
use crate::error::{CacheReplaceError, Result};
use crate::render::{Locals, PartialRenderer};
use std::collections::HashMap;

/// Renders partials from sources held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    partials: HashMap<String, String>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.partials.insert(name.into(), source.into());
    }

    pub fn with_partial(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }
}

impl PartialRenderer for MemoryRenderer {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        let source = self
            .partials
            .get(partial)
            .ok_or_else(|| CacheReplaceError::PartialNotFound {
                partial: partial.to_string(),
            })?;
        interpolate(partial, source, locals)
    }
}
