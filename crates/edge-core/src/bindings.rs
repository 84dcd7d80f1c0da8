//! Platform bindings: named configuration values injected by the host.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::BindingError;

/// Read access to named bindings.
///
/// Implementations must read the current value on every call; callers rely
/// on updates being visible without a restart.
pub trait Bindings: Send + Sync {
    /// Get a binding value, if set.
    fn get(&self, name: &str) -> Option<String>;

    /// Get a binding value, failing when it is not set.
    fn require(&self, name: &str) -> Result<String, BindingError> {
        self.get(name)
            .ok_or_else(|| BindingError::Missing(name.to_string()))
    }
}

/// In-memory bindings, settable at runtime.
#[derive(Debug, Default)]
pub struct StaticBindings {
    values: RwLock<HashMap<String, String>>,
}

impl StaticBindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bindings from an existing map.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Add a binding (builder style).
    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set or replace a binding.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(name.into(), value.into());
    }

    /// Remove a binding.
    pub fn remove(&self, name: &str) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(name);
    }
}

impl Bindings for StaticBindings {
    fn get(&self, name: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(name).cloned()
    }
}

/// Bindings backed by the process environment.
///
/// `link_title` with prefix `EDGE_` reads `EDGE_LINK_TITLE`.
#[derive(Debug, Clone, Default)]
pub struct EnvBindings {
    prefix: String,
}

impl EnvBindings {
    /// Create environment bindings with a variable prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Environment variable name for a binding.
    pub fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name.to_uppercase())
    }
}

impl Bindings for EnvBindings {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(self.var_name(name)).ok()
    }
}

/// Bindings that try each layer in order.
pub struct LayeredBindings {
    layers: Vec<Box<dyn Bindings>>,
}

impl LayeredBindings {
    /// Create layered bindings; earlier layers win.
    pub fn new(layers: Vec<Box<dyn Bindings>>) -> Self {
        Self { layers }
    }
}

impl Bindings for LayeredBindings {
    fn get(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_bindings_get_set() {
        let bindings = StaticBindings::new().with("link_title", "Contacts");
        assert_eq!(bindings.get("link_title"), Some("Contacts".to_string()));

        bindings.set("link_title", "People");
        assert_eq!(bindings.get("link_title"), Some("People".to_string()));

        bindings.remove("link_title");
        assert!(bindings.get("link_title").is_none());
    }

    #[test]
    fn test_require_missing() {
        let bindings = StaticBindings::new();
        let err = bindings.require("link_title").unwrap_err();
        assert!(matches!(err, BindingError::Missing(ref name) if name == "link_title"));
    }

    #[test]
    fn test_env_var_name() {
        let env = EnvBindings::with_prefix("EDGE_");
        assert_eq!(env.var_name("link_title"), "EDGE_LINK_TITLE");
    }

    #[test]
    fn test_layered_bindings_order() {
        let first = StaticBindings::new().with("a", "1");
        let second = StaticBindings::new().with("a", "2").with("b", "3");
        let layered = LayeredBindings::new(vec![Box::new(first), Box::new(second)]);

        assert_eq!(layered.get("a"), Some("1".to_string()));
        assert_eq!(layered.get("b"), Some("3".to_string()));
        assert!(layered.get("c").is_none());
    }
}
