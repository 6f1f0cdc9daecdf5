use super::consts::{DEFAULT_EXTENSION, DEFAULT_PARTIALS_DIR, DEFAULT_PREFIX};
use crate::error::{CacheReplaceError, Result};
use crate::render::Locals;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// cache-replace.toml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub partials: PartialsConfig,
    /// Locals passed to every render, overridable per call
    #[serde(default)]
    pub locals: Locals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialsConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for PartialsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
            prefix: default_prefix(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PARTIALS_DIR)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Config {
    /// Parse and validate a config document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CacheReplaceError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read cache-replace.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CacheReplaceError::ConfigParseError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Write cache-replace.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CacheReplaceError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let extension = &self.partials.extension;
        if extension.is_empty() || extension.starts_with('.') || extension.contains(['/', '\\']) {
            return Err(CacheReplaceError::ConfigInvalidValue {
                field: "partials.extension".to_string(),
                reason: format!("'{}' must be a bare extension such as 'html'", extension),
            });
        }

        if self.partials.prefix.contains(['/', '\\']) {
            return Err(CacheReplaceError::ConfigInvalidValue {
                field: "partials.prefix".to_string(),
                reason: "must not contain path separators".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.partials.dir, PathBuf::from("."));
        assert_eq!(config.partials.extension, "html");
        assert_eq!(config.partials.prefix, "_");
        assert!(config.locals.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[partials]
dir = "views/shared"
extension = "erb"
prefix = ""

[locals]
site = "Example"

[locals.owner]
name = "Ada"
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.partials.dir, PathBuf::from("views/shared"));
        assert_eq!(config.partials.extension, "erb");
        assert_eq!(config.partials.prefix, "");
        assert_eq!(
            config.locals.get("site"),
            Some(&Value::String("Example".to_string()))
        );
        assert!(config.locals.get("owner").unwrap().is_table());
    }

    #[test]
    fn test_reject_dotted_extension() {
        let err = Config::from_toml_str("[partials]\nextension = \".html\"").unwrap_err();
        assert!(matches!(
            err,
            CacheReplaceError::ConfigInvalidValue { field, .. } if field == "partials.extension"
        ));
    }

    #[test]
    fn test_reject_prefix_with_separator() {
        let err = Config::from_toml_str("[partials]\nprefix = \"a/\"").unwrap_err();
        assert!(matches!(err, CacheReplaceError::ConfigInvalidValue { .. }));
    }

    #[test]
    fn test_reject_malformed_toml() {
        let err = Config::from_toml_str("[partials").unwrap_err();
        assert!(matches!(err, CacheReplaceError::ConfigParseError(_)));
    }

    #[test]
    fn test_round_trip_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("cache-replace.toml");

        let mut config = Config::default();
        config.partials.dir = PathBuf::from("partials");
        config
            .locals
            .insert("site".to_string(), Value::String("Example".to_string()));
        config.to_file(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}
