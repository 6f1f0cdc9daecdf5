//! `render_cached` entry point
//!
//! Renders a (typically cached) partial once, then injects the dynamic parts
//! into its `<cr name>` markers according to the supplied instruction:
//!
//! ```
//! use cache_replace_core::renderer::MemoryRenderer;
//! use cache_replace_core::{render_cached, RenderOptions, Replacements};
//!
//! let renderer = MemoryRenderer::new().with_partial("card", "<div><cr user></div>");
//! let options = RenderOptions::new().replace(Replacements::new().with("user", "Ada"));
//! let html = render_cached(&renderer, "card", options).unwrap();
//! assert_eq!(html.as_str(), "<div>Ada</div>");
//! ```

use crate::error::{CacheReplaceError, Result};
use crate::fragment::{check_pairing, Fragment};
use crate::instruction::{Instruction, Replacements};
use crate::marker::find_markers;
use std::fmt;
use toml::Value;

/// Template locals forwarded to the partial renderer
pub type Locals = toml::Table;

/// Renders a named partial with locals
///
/// Implementations own template lookup and any fragment caching. Errors they
/// return are propagated unchanged.
pub trait PartialRenderer {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String>;
}

impl<R: PartialRenderer + ?Sized> PartialRenderer for &R {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        (**self).render(partial, locals)
    }
}

impl<R: PartialRenderer + ?Sized> PartialRenderer for Box<R> {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        (**self).render(partial, locals)
    }
}

/// Final output that must not be escaped again by the host renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Mark text as already safe
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TrustedHtml> for String {
    fn from(html: TrustedHtml) -> Self {
        html.0
    }
}

type DeferredFn<'f> = Box<dyn FnOnce() -> Replacements + 'f>;

/// Options for [`render_cached`]
///
/// `replace` and `collection` steer substitution and are never forwarded to the
/// renderer; only `locals` are.
pub struct RenderOptions<'f, T = ()> {
    pub locals: Locals,
    pub replace: Option<Instruction<'f, T>>,
    pub collection: Option<Vec<T>>,
    pub deferred: Option<DeferredFn<'f>>,
}

impl<'f> RenderOptions<'f> {
    /// Options for a partial rendered once, without a collection
    pub fn new() -> Self {
        Self::empty()
    }
}

impl<'f, T> RenderOptions<'f, T> {
    fn empty() -> Self {
        Self {
            locals: Locals::new(),
            replace: None,
            collection: None,
            deferred: None,
        }
    }

    /// Options for a partial expanded once per item
    pub fn for_collection(items: impl IntoIterator<Item = T>) -> Self {
        Self::empty().collection(items)
    }

    /// Add a template local
    pub fn local(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.locals.insert(key.into(), value.into());
        self
    }

    /// Replace all locals
    pub fn locals(mut self, locals: Locals) -> Self {
        self.locals = locals;
        self
    }

    pub fn replace(mut self, instruction: impl Into<Instruction<'f, T>>) -> Self {
        self.replace = Some(instruction.into());
        self
    }

    pub fn collection(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.collection = Some(items.into_iter().collect());
        self
    }

    /// Supply the replacements lazily, after the partial has been rendered
    pub fn deferred(mut self, f: impl FnOnce() -> Replacements + 'f) -> Self {
        self.deferred = Some(Box::new(f));
        self
    }
}

impl<T> Default for RenderOptions<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for RenderOptions<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("locals", &self.locals)
            .field("replace", &self.replace)
            .field("collection", &self.collection.as_ref().map(Vec::len))
            .field("deferred", &self.deferred.is_some())
            .finish()
    }
}

/// Substitution chosen from the shape of the options
enum Plan<'f, T> {
    Apply(Instruction<'f, T>, Option<Vec<T>>),
    Deferred(DeferredFn<'f>),
}

fn plan<'f, T>(
    replace: Option<Instruction<'f, T>>,
    collection: Option<Vec<T>>,
    deferred: Option<DeferredFn<'f>>,
) -> Result<Plan<'f, T>> {
    match (replace, deferred) {
        (Some(_), Some(_)) => Err(CacheReplaceError::invalid_combination(
            "a replace instruction and a callback cannot be combined",
        )),
        (Some(instruction), None) => {
            check_pairing(&instruction, collection.is_some())?;
            Ok(Plan::Apply(instruction, collection))
        }
        (None, Some(_)) if collection.is_some() => Err(CacheReplaceError::invalid_combination(
            "a collection requires a collection map instruction, not a callback",
        )),
        (None, Some(f)) => Ok(Plan::Deferred(f)),
        (None, None) => Err(CacheReplaceError::MissingReplace),
    }
}

/// Render `partial` and substitute its markers
///
/// Only `options.locals` reach the renderer. The instruction shape is checked
/// before the partial is rendered; a missing instruction is reported after the
/// base render, which is the only render performed in that case.
pub fn render_cached<'f, R, T>(
    renderer: &R,
    partial: &str,
    options: RenderOptions<'f, T>,
) -> Result<TrustedHtml>
where
    R: PartialRenderer + ?Sized,
{
    let RenderOptions {
        locals,
        replace,
        collection,
        deferred,
    } = options;

    let planned = match plan(replace, collection, deferred) {
        Err(CacheReplaceError::MissingReplace) => {
            renderer.render(partial, &locals)?;
            return Err(CacheReplaceError::MissingReplace);
        }
        other => other?,
    };

    tracing::debug!(partial, "rendering cached partial");
    let mut fragment = Fragment::new(renderer.render(partial, &locals)?);

    match planned {
        Plan::Apply(instruction, collection) => {
            fragment.replace(renderer, &locals, instruction, collection.as_deref())?;
        }
        Plan::Deferred(f) => {
            tracing::debug!(partial, "resolving deferred replacements");
            fragment.replace_map(&f());
        }
    }

    let leftover = find_markers(fragment.as_str());
    if !leftover.is_empty() {
        tracing::debug!(partial, markers = ?leftover, "unreplaced markers in output");
    }

    Ok(fragment.into_trusted())
}
