//! Errors raised while interpolating locals into a partial

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `{{ name }}` with no such local, or a dotted path that stops early
    #[error("Undefined local '{key}' at line {line}")]
    UndefinedLocal { key: String, line: usize },

    /// Unclosed or empty `{{ }}`
    #[error("Malformed placeholder at line {line}: {message}")]
    MalformedPlaceholder { message: String, line: usize },

    #[error("Local '{key}' is an array; join it into a string before rendering")]
    ArrayLocal { key: String },

    /// Only scalars print; reach into a table with `{{ key.field }}`
    #[error("Local '{key}' is a table; use a dotted path such as {key}.field")]
    TableLocal { key: String },
}
