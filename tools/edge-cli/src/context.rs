//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use edge_core::{AppConfig, Bindings, EnvBindings, LayeredBindings, RequestId};
use edge_observability::{LogLevel, StructuredLogger, TracingSink};

use crate::output::Output;

/// Config file names searched for, in order.
const CONFIG_NAMES: [&str; 3] = ["edge.toml", ".edge.toml", "edge.json"];

/// Prefix for environment variables overriding bindings.
const BINDING_ENV_PREFIX: &str = "EDGE_";

/// Execution context for CLI commands.
pub struct Context {
    /// Application configuration.
    pub config: AppConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_path(&cwd, path);
            let config = AppConfig::load(&path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            (config, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (AppConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(AppConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = AppConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Bindings for loaders: `EDGE_*` environment variables, then the
    /// `[bindings]` table.
    pub fn bindings(&self) -> Arc<dyn Bindings> {
        let layers: Vec<Box<dyn Bindings>> = vec![
            Box::new(EnvBindings::with_prefix(BINDING_ENV_PREFIX)),
            Box::new(self.config.static_bindings()),
        ];
        Arc::new(LayeredBindings::new(layers))
    }

    /// Logger template for the app.
    ///
    /// Verbose runs route entries through `tracing` at debug level.
    pub fn logger(&self) -> StructuredLogger {
        let logger = StructuredLogger::new(RequestId::from_string("edge-cli"))
            .with_workload(self.config.app.name.clone())
            .with_config(&self.config.logging);

        if self.output.is_verbose() {
            logger
                .with_min_level(LogLevel::Debug)
                .with_sink(Arc::new(TracingSink))
        } else {
            logger
        }
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}
