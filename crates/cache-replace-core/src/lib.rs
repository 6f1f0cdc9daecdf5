// Core modules
pub mod config;
pub mod error;
pub mod fragment;
pub mod instruction;
pub mod marker;
pub mod render;
pub mod renderer;
pub mod template;

// Re-export commonly used types
pub use error::{CacheReplaceError, Result};
pub use fragment::Fragment;
pub use instruction::{CollectionMap, Instruction, Replacements};
pub use marker::marker;
pub use render::{render_cached, Locals, PartialRenderer, RenderOptions, TrustedHtml};
