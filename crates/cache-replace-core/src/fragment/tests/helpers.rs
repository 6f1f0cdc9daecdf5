//! Shared test helpers for fragment tests

use crate::error::{CacheReplaceError, Result};
use crate::render::{Locals, PartialRenderer};
use std::cell::RefCell;
use std::collections::HashMap;

/// Renderer returning fixed text per partial, recording each call
#[derive(Default)]
pub(super) struct StubRenderer {
    partials: HashMap<String, String>,
    pub(super) calls: RefCell<Vec<(String, Locals)>>,
}

impl StubRenderer {
    pub(super) fn with(mut self, name: &str, text: &str) -> Self {
        self.partials.insert(name.to_string(), text.to_string());
        self
    }
}

impl PartialRenderer for StubRenderer {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((partial.to_string(), locals.clone()));
        self.partials
            .get(partial)
            .cloned()
            .ok_or_else(|| CacheReplaceError::PartialNotFound {
                partial: partial.to_string(),
            })
    }
}
