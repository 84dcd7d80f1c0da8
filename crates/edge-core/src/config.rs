//! Application configuration.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bindings::StaticBindings;
use crate::error::ConfigError;

/// Top-level application configuration file (`edge.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application settings.
    #[serde(default)]
    pub app: AppSection,

    /// Binding values exposed to loaders.
    #[serde(default)]
    pub bindings: HashMap<String, String>,

    /// Crawler detection settings.
    #[serde(default)]
    pub crawlers: CrawlerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load config from a file, picking the format from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().map_or(false, |e| e == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse TOML config.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON config.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::Invalid("app.name must not be empty".to_string()));
        }
        if let Some(i) = self
            .crawlers
            .signatures
            .iter()
            .position(|s| s.trim().trim_matches('*').is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "crawlers.signatures[{}] is empty",
                i
            )));
        }
        Ok(())
    }

    /// Build mutable bindings seeded from the `[bindings]` table.
    pub fn static_bindings(&self) -> StaticBindings {
        StaticBindings::from_map(self.bindings.clone())
    }
}

/// `[app]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    /// Application name.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Render every page fully before responding.
    #[serde(default)]
    pub spa_mode: bool,
}

fn default_app_name() -> String {
    "edge-app".to_string()
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            spa_mode: false,
        }
    }
}

/// `[crawlers]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-agent signatures treated as automated crawlers.
    #[serde(default)]
    pub signatures: Vec<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn, error.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: json or human.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
