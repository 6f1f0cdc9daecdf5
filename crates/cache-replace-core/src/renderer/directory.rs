use super::interpolate;
use crate::config::PartialsConfig;
use crate::error::{CacheReplaceError, Result};
use crate::render::{Locals, PartialRenderer};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Renders partials from files under a root directory
///
/// Partial `card` resolves to `<root>/_card.html`, `users/row` to
/// `<root>/users/_row.html` (prefix and extension are configurable).
#[derive(Debug, Clone)]
pub struct DirectoryRenderer {
    root: PathBuf,
    extension: String,
    prefix: String,
}

impl DirectoryRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(&PartialsConfig {
            dir: root.into(),
            ..PartialsConfig::default()
        })
    }

    pub fn from_config(config: &PartialsConfig) -> Self {
        Self {
            root: config.dir.clone(),
            extension: config.extension.clone(),
            prefix: config.prefix.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a partial name to its file, rejecting names that leave the root
    pub fn resolve(&self, partial: &str) -> Result<PathBuf> {
        let name = Path::new(partial);
        let escapes = || CacheReplaceError::PartialPathEscape {
            partial: partial.to_string(),
            root: self.root.clone(),
        };

        if partial.is_empty() || name.is_absolute() {
            return Err(escapes());
        }
        if !name
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(escapes());
        }

        let file_name = name.file_name().ok_or_else(escapes)?.to_string_lossy();
        let file = format!("{}{}.{}", self.prefix, file_name, self.extension);

        let mut path = self.root.clone();
        if let Some(parent) = name.parent().filter(|p| !p.as_os_str().is_empty()) {
            path.push(parent);
        }
        path.push(file);
        Ok(path)
    }
}

impl PartialRenderer for DirectoryRenderer {
    fn render(&self, partial: &str, locals: &Locals) -> Result<String> {
        let path = self.resolve(partial)?;
        tracing::debug!(partial, path = %path.display(), "reading partial");

        let source = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CacheReplaceError::PartialNotFound {
                partial: partial.to_string(),
            },
            _ => CacheReplaceError::IoError(e),
        })?;

        interpolate(partial, &source, locals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use toml::toml;

    #[test]
    fn test_resolve_rails_style_names() {
        let renderer = DirectoryRenderer::new("views");
        assert_eq!(
            renderer.resolve("card").unwrap(),
            PathBuf::from("views").join("_card.html")
        );
        assert_eq!(
            renderer.resolve("users/row").unwrap(),
            PathBuf::from("views").join("users").join("_row.html")
        );
    }

    #[test]
    fn test_resolve_custom_prefix_and_extension() {
        let renderer = DirectoryRenderer::from_config(&PartialsConfig {
            dir: PathBuf::from("p"),
            extension: "htm".to_string(),
            prefix: String::new(),
        });
        assert_eq!(
            renderer.resolve("card").unwrap(),
            PathBuf::from("p").join("card.htm")
        );
    }

    #[test]
    fn test_resolve_rejects_escaping_names() {
        let renderer = DirectoryRenderer::new("views");
        for name in ["../secret", "a/../../b", "/etc/passwd", "", "./card"] {
            assert!(
                matches!(
                    renderer.resolve(name),
                    Err(CacheReplaceError::PartialPathEscape { .. })
                ),
                "'{}' should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_render_reads_and_interpolates() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("_card.html"),
            "<div>{{ title }}<cr body></div>",
        )
        .unwrap();

        let renderer = DirectoryRenderer::new(temp.path());
        let html = renderer
            .render("card", &toml! { title = "Hi" })
            .unwrap();
        assert_eq!(html, "<div>Hi<cr body></div>");
    }

    #[test]
    fn test_render_missing_file() {
        let temp = TempDir::new().unwrap();
        let renderer = DirectoryRenderer::new(temp.path());
        let err = renderer.render("missing", &Locals::new()).unwrap_err();
        assert!(matches!(err, CacheReplaceError::PartialNotFound { .. }));
    }
}
