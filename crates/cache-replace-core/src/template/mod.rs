//! Locals interpolation for partial sources
//!
//! Partials rendered by the bundled renderers may reference their locals with
//! `{{ key }}` placeholders before marker substitution runs.
//!
//! ## Syntax
//!
//! - Basic placeholders: `{{key}}` or `{{ key }}` (spaces optional)
//! - Nested access: `{{user.name}}`
//! - Escape sequences: `\{{literal}}` renders `{{literal}}`, `\\{{key}}` renders `\value`
//!
//! `<cr name>` markers are plain text to this module and pass through untouched.

pub mod engine;
pub mod error;

pub use engine::{render, TemplateEngine};
pub use error::TemplateError;
