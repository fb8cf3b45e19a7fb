//! Theme engine wrapping Tera.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::listing::{format_phone, format_phone_number};

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let template_dir = template_dir.canonicalize().with_context(|| {
            format!("templates directory {} not found", template_dir.display())
        })?;
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Create a theme engine with no templates (for testing).
    pub fn empty() -> Self {
        let mut tera = Tera::default();
        Self::register_filters(&mut tera);
        Self { tera }
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // Phone display: numbers, strings and null are all accepted
        tera.register_filter(
            "phone",
            |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let formatted = match value {
                    tera::Value::Null => String::new(),
                    tera::Value::String(s) => format_phone(Some(s)),
                    tera::Value::Number(n) if n.as_i64().is_some() => {
                        format_phone_number(n.as_i64())
                    }
                    other => format_phone(Some(&other.to_string())),
                };
                Ok(tera::Value::String(formatted))
            },
        );
    }

    /// Get a mutable reference to Tera (for adding templates at runtime).
    pub fn tera_mut(&mut self) -> &mut Tera {
        &mut self.tera
    }

    /// Render a template.
    pub fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("failed to render template {template}"))
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn render_phone(value: serde_json::Value) -> String {
        let mut theme = ThemeEngine::empty();
        theme
            .tera_mut()
            .add_raw_template("test", "{{ p | phone }}")
            .unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("p", &value);
        theme.render("test", &ctx).unwrap()
    }

    #[test]
    fn phone_filter_formats_numbers() {
        assert_eq!(render_phone(serde_json::json!(5551234567_i64)), "555-123-4567");
    }

    #[test]
    fn phone_filter_formats_strings() {
        assert_eq!(render_phone(serde_json::json!("1234567890")), "123-456-7890");
        assert_eq!(render_phone(serde_json::json!("123")), "123");
    }

    #[test]
    fn missing_template_dir_is_an_error() {
        let err = ThemeEngine::new(Path::new("/nonexistent/templates")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn phone_filter_null_is_empty() {
        assert_eq!(render_phone(serde_json::Value::Null), "");
    }

    #[test]
    fn phone_filter_zero_is_empty() {
        assert_eq!(render_phone(serde_json::json!(0)), "");
    }
}
