//! # Kennel Configuration
//!
//! A minimal string key/value store, mirroring Feathers' `app.set()` /
//! `app.get()`. Values are layered by the application (defaults first,
//! then environment overrides).
//!
//! ```rust
//! use kennel_core::KennelConfig;
//! let mut config = KennelConfig::new();
//!
//! config.set("http.port", "3000");
//! assert_eq!(config.snapshot().get_u16("http.port"), Some(3000));
//! ```
//!
//! ## Environment overrides
//! [`KennelConfig::merge_env`] maps `PREFIX__SECTION__KEY=value` to
//! `section.key`:
//!
//! ```bash
//! export KENNEL__HTTP__HOST=0.0.0.0
//! ```

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct KennelConfig {
    values: HashMap<String, String>,
}

impl KennelConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Set a key only if nothing has set it yet.
    pub fn set_default<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Apply `PREFIX__A__B=value` pairs as `a.b = value`.
    pub fn merge_env<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(stripped) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
                continue;
            };

            let normalized = stripped.to_lowercase().replace("__", ".");
            if !normalized.is_empty() {
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> KennelConfigSnapshot {
        KennelConfigSnapshot::new(self.values.clone())
    }
}

/// Read-only copy of a [`KennelConfig`] with typed getters.
#[derive(Debug, Clone, Default)]
pub struct KennelConfigSnapshot {
    map: HashMap<String, String>,
}

impl KennelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.trim().parse::<u16>().ok())
    }
}
