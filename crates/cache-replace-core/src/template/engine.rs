//! Locals interpolation engine

use crate::render::Locals;
use crate::template::error::TemplateError;
use toml::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Resolve a nested key from locals
fn resolve_key<'a>(locals: &'a Locals, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = locals.get(parts.next()?)?;

    for part in parts {
        current = match current {
            Value::Table(table) => table.get(part)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Stringify a TOML value for output
fn stringify_value(value: &Value, key: &str) -> Result<String, TemplateError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) => Err(TemplateError::ArrayLocal {
            key: key.to_string(),
        }),
        Value::Table(_) => Err(TemplateError::TableLocal {
            key: key.to_string(),
        }),
    }
}

/// Count backslashes immediately before `pos`, not looking before `floor`
fn count_backslashes_before(text: &str, floor: usize, pos: usize) -> usize {
    text.as_bytes()[floor..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

fn count_newlines(text: &str) -> usize {
    text.chars().filter(|&c| c == '\n').count()
}

/// Locals interpolation engine
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Render `template`, replacing each `{{ key }}` with its local
    ///
    /// Single pass: interpolated values are never scanned again.
    pub fn render(&self, template: &str, locals: &Locals) -> Result<String, TemplateError> {
        let mut output = String::with_capacity(template.len());
        let mut line = 1;
        let mut pos = 0;

        while let Some(found) = template[pos..].find(OPEN) {
            let open = pos + found;
            let backslashes = count_backslashes_before(template, pos, open);
            let text = &template[pos..open - backslashes];
            output.push_str(text);
            line += count_newlines(text);

            // Output half of the backslashes (integer division)
            for _ in 0..(backslashes / 2) {
                output.push('\\');
            }

            let escaped = backslashes % 2 == 1;
            let body_start = open + OPEN.len();
            let close = template[body_start..]
                .find(CLOSE)
                .ok_or_else(|| TemplateError::MalformedPlaceholder {
                    message: if escaped {
                        "Unclosed escaped placeholder".to_string()
                    } else {
                        "Unclosed placeholder".to_string()
                    },
                    line,
                })?;
            let body = &template[body_start..body_start + close];

            if escaped {
                output.push_str(OPEN);
                output.push_str(body);
                output.push_str(CLOSE);
            } else {
                self.process_placeholder(body.trim(), locals, &mut output, line)?;
            }

            line += count_newlines(body);
            pos = body_start + close + CLOSE.len();
        }

        output.push_str(&template[pos..]);
        Ok(output)
    }

    fn process_placeholder(
        &self,
        expr: &str,
        locals: &Locals,
        output: &mut String,
        line: usize,
    ) -> Result<(), TemplateError> {
        if expr.is_empty() {
            return Err(TemplateError::MalformedPlaceholder {
                message: "Empty placeholder".to_string(),
                line,
            });
        }

        let value = resolve_key(locals, expr).ok_or_else(|| TemplateError::UndefinedLocal {
            key: expr.to_string(),
            line,
        })?;

        output.push_str(&stringify_value(value, expr)?);
        Ok(())
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to render a template
pub fn render(template: &str, locals: &Locals) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, locals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::toml;

    fn simple_locals() -> Locals {
        toml! {
            title = "My Title"
            count = 42
            price = 9.99
            enabled = true
            date = 2026-01-15

            [user]
            name = "Ada"
            tags = ["a", "b"]
        }
    }

    #[test]
    fn test_render_simple_placeholder() {
        let result = render("Title: {{title}}", &simple_locals()).unwrap();
        assert_eq!(result, "Title: My Title");
    }

    #[test]
    fn test_render_placeholder_with_spaces() {
        let result = render("Title: {{  title  }}", &simple_locals()).unwrap();
        assert_eq!(result, "Title: My Title");
    }

    #[test]
    fn test_render_nested_key() {
        let result = render("<b>{{ user.name }}</b>", &simple_locals()).unwrap();
        assert_eq!(result, "<b>Ada</b>");
    }

    #[test]
    fn test_render_scalar_values() {
        let result = render(
            "{{count}} {{price}} {{enabled}} {{date}}",
            &simple_locals(),
        )
        .unwrap();
        assert_eq!(result, "42 9.99 true 2026-01-15");
    }

    #[test]
    fn test_render_leaves_markers_alone() {
        let result = render("<p>{{title}}</p><cr inner>", &simple_locals()).unwrap();
        assert_eq!(result, "<p>My Title</p><cr inner>");
    }

    #[test]
    fn test_render_no_rescan_of_values() {
        let locals = toml! {
            a = "{{b}}"
            b = "x"
        };
        let result = render("{{a}}", &locals).unwrap();
        assert_eq!(result, "{{b}}");
    }

    #[test]
    fn test_render_escape_sequences() {
        let result = render(r#"Literal: \{{ title }}"#, &simple_locals()).unwrap();
        assert_eq!(result, "Literal: {{ title }}");
    }

    #[test]
    fn test_render_double_backslash_escape() {
        let result = render(r#"Backslash: \\{{title}}"#, &simple_locals()).unwrap();
        assert_eq!(result, r#"Backslash: \My Title"#);
    }

    #[test]
    fn test_error_undefined_local_reports_line() {
        let result = render("first\nsecond {{missing}}", &simple_locals());
        match result {
            Err(TemplateError::UndefinedLocal { key, line }) => {
                assert_eq!(key, "missing");
                assert_eq!(line, 2);
            }
            other => panic!("Expected UndefinedLocal error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_unclosed_placeholder() {
        match render("Value: {{title", &simple_locals()) {
            Err(TemplateError::MalformedPlaceholder { message, .. }) => {
                assert_eq!(message, "Unclosed placeholder");
            }
            other => panic!("Expected MalformedPlaceholder error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_unclosed_escaped_placeholder() {
        match render(r#"Before \{{title after"#, &simple_locals()) {
            Err(TemplateError::MalformedPlaceholder { message, .. }) => {
                assert!(message.contains("Unclosed escaped"));
            }
            other => panic!("Expected MalformedPlaceholder error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_empty_placeholder() {
        assert!(matches!(
            render("{{ }}", &simple_locals()),
            Err(TemplateError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_local() {
        let undefined = render("{{missing}}", &simple_locals()).unwrap_err();
        assert_eq!(undefined.to_string(), "Undefined local 'missing' at line 1");

        let table = render("{{user}}", &simple_locals()).unwrap_err();
        assert_eq!(
            table.to_string(),
            "Local 'user' is a table; use a dotted path such as user.field"
        );
    }

    #[test]
    fn test_error_table_and_array() {
        assert_eq!(
            render("{{user}}", &simple_locals()),
            Err(TemplateError::TableLocal {
                key: "user".to_string()
            })
        );
        assert_eq!(
            render("{{user.tags}}", &simple_locals()),
            Err(TemplateError::ArrayLocal {
                key: "user.tags".to_string()
            })
        );
    }
}
