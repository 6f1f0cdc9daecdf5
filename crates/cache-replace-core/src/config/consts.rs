//! Configuration defaults

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cache-replace.toml";

/// Partials live in this directory unless configured
pub const DEFAULT_PARTIALS_DIR: &str = ".";

/// File extension of partial sources, without the dot
pub const DEFAULT_EXTENSION: &str = "html";

/// Prefix of partial file names (`_card.html` for partial `card`)
pub const DEFAULT_PREFIX: &str = "_";
