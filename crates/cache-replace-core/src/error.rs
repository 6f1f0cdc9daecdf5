use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheReplaceError {
    // Usage errors
    #[error("MISSING_REPLACE: must supply either a replace instruction or a callback")]
    MissingReplace,

    #[error("INVALID_COMBINATION: {reason}")]
    InvalidCombination { reason: String },

    // Render errors
    #[error("PARTIAL_NOT_FOUND: partial '{partial}' not found")]
    PartialNotFound { partial: String },

    #[error("PARTIAL_PATH_ESCAPE: partial '{partial}' resolves outside '{root}'")]
    PartialPathEscape { partial: String, root: PathBuf },

    #[error("RENDER_FAILED: partial '{partial}': {reason}")]
    Render { partial: String, reason: String },

    #[error("TEMPLATE_ERROR: partial '{partial}': {source}")]
    Template {
        partial: String,
        #[source]
        source: crate::template::TemplateError,
    },

    // Collection errors
    #[error("ITEM_REPLACE_FAILED: key '{key}' at item {index}: {reason}")]
    ItemReplace {
        key: String,
        index: usize,
        reason: String,
    },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl CacheReplaceError {
    pub(crate) fn invalid_combination(reason: impl Into<String>) -> Self {
        CacheReplaceError::InvalidCombination {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheReplaceError>;
