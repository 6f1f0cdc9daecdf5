//! Renderer doubles for observing calls and injecting failures

use cache_replace_core::{CacheReplaceError, Locals, PartialRenderer, Result};
use std::sync::{Mutex, MutexGuard};

/// One call made to a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub partial: String,
    pub locals: Locals,
}

/// Wraps a renderer and records every call made through it
///
/// # Examples
///
/// ```
/// use cache_replace_core::renderer::MemoryRenderer;
/// use cache_replace_core::{Locals, PartialRenderer};
/// use cache_replace_testkit::RecordingRenderer;
///
/// let renderer = RecordingRenderer::new(MemoryRenderer::new().with_partial("a", "A"));
/// renderer.render("a", &Locals::new()).unwrap();
/// assert_eq!(renderer.partials(), vec!["a"]);
/// ```
pub struct RecordingRenderer<R> {
    inner: R,
    calls: Mutex<Vec<RenderCall>>,
}

impl<R: PartialRenderer> RecordingRenderer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls recorded before a panic stay readable
    fn lock_calls(&self) -> MutexGuard<'_, Vec<RenderCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<RenderCall> {
        self.lock_calls().clone()
    }

    /// Names of the partials rendered so far, in order
    pub fn partials(&self) -> Vec<String> {
        self.lock_calls()
            .iter()
            .map(|call| call.partial.clone())
            .collect()
    }
}

impl<R: PartialRenderer> PartialRenderer for RecordingRenderer<R> {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        self.lock_calls().push(RenderCall {
            partial: partial.to_string(),
            locals: locals.clone(),
        });
        self.inner.render(partial, locals)
    }
}

/// Fails to render one partial and delegates the rest
pub struct FailingRenderer<R> {
    inner: R,
    failing: String,
}

impl<R: PartialRenderer> FailingRenderer<R> {
    pub fn new(inner: R, failing: impl Into<String>) -> Self {
        Self {
            inner,
            failing: failing.into(),
        }
    }
}

impl<R: PartialRenderer> PartialRenderer for FailingRenderer<R> {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        if partial == self.failing {
            return Err(CacheReplaceError::Render {
                partial: partial.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.render(partial, locals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cache_replace_core::renderer::MemoryRenderer;

    #[test]
    fn test_calls_survive_poisoned_lock() {
        let renderer = RecordingRenderer::new(MemoryRenderer::new().with_partial("a", "A"));
        renderer.render("a", &Locals::new()).unwrap();

        let poisoned = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = renderer.lock_calls();
                    panic!("poison the call log");
                })
                .join()
        });
        assert!(poisoned.is_err());
        assert!(renderer.calls.is_poisoned());

        renderer.render("a", &Locals::new()).unwrap();
        assert_eq!(renderer.partials(), vec!["a", "a"]);
    }
}
