use thiserror::Error;

/// Failures while loading or editing the checklist configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to encode configuration: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("template field '{0}' is required")]
    MissingField(&'static str),
    #[error("template '{0}' does not exist")]
    UnknownTemplate(String),
}

/// Failures while registering or rendering a handlebars template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid template: {0}")]
    Parse(#[from] handlebars::TemplateError),
    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}
