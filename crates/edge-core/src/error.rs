//! Error types shared across the platform crates.

use thiserror::Error;

/// Errors raised while rendering a page.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The shell could not be produced.
    #[error("Shell render failed: {0}")]
    Shell(String),

    /// A deferred section failed after the shell was produced.
    #[error("Section '{name}' failed: {message}")]
    Section { name: String, message: String },

    /// Writing the body failed.
    #[error("Streaming error: {0}")]
    Stream(String),
}

impl RenderError {
    /// Create a section error.
    pub fn section(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Section {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Errors reading platform bindings.
#[derive(Debug, Clone, Error)]
pub enum BindingError {
    #[error("Binding not set: {0}")]
    Missing(String),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
