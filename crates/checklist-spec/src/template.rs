use handlebars::{Handlebars, handlebars_helper, no_escape};
use serde::Serialize;

use crate::error::TemplateError;

handlebars_helper!(fallback: |value: str, placeholder: str| {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
});

/// Registers the helpers every checklist template may use.
///
/// `{{fallback value "[placeholder]"}}` renders the placeholder when the value
/// is empty.
pub fn register_default_helpers(registry: &mut Handlebars<'_>) {
    registry.register_helper("fallback", Box::new(fallback));
}

/// Plain-text handlebars registry; output is never HTML-escaped.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        register_default_helpers(&mut registry);
        Self { registry }
    }

    pub fn register(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.registry.register_template_string(name, source)?;
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        Ok(self.registry.render(name, data)?)
    }

    /// Renders an ad-hoc template without registering it.
    pub fn render_source<T: Serialize>(
        &self,
        source: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        Ok(self.registry.render_template(source, data)?)
    }
}
