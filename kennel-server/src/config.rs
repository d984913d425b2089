use std::collections::HashMap;

use anyhow::{anyhow, Result};
use kennel_core::{KennelConfig, KennelConfigSnapshot};

/// Prefix for generic `KENNEL__SECTION__KEY` overrides.
pub const ENV_PREFIX: &str = "KENNEL";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://kennel.db?mode=rwc";

/// `database.url` value that selects the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Build the configuration from environment variables.
///
/// Explicit `KENNEL__*` overrides win; the conventional variables and
/// defaults only fill what is still missing.
pub fn from_vars<I>(vars: I) -> KennelConfig
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: HashMap<String, String> = vars.into_iter().collect();
    let var = |name: &str| vars.get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let mut config = KennelConfig::new();
    config.merge_env(ENV_PREFIX, vars.clone());

    config.set_default("app.env", var("KENNEL_ENV").unwrap_or_else(|| "development".to_string()));

    let default_port = if config.get("app.env") == Some("test") { "3001" } else { "3000" };
    config.set_default("http.host", var("HTTP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()));
    config.set_default("http.port", var("HTTP_PORT").unwrap_or_else(|| default_port.to_string()));
    config.set_default(
        "database.url",
        var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
    );

    config
}

pub fn load() -> KennelConfig {
    from_vars(std::env::vars())
}

/// Typed view of the keys the server reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl Settings {
    pub fn from_config(config: &KennelConfigSnapshot) -> Result<Self> {
        let required = |key: &str| {
            config
                .get_string(key)
                .ok_or_else(|| anyhow!("missing configuration key '{key}'"))
        };

        let port = config.get_u16("http.port").ok_or_else(|| {
            anyhow!(
                "http.port must be a port number, got {:?}",
                config.get("http.port").unwrap_or_default()
            )
        })?;

        Ok(Self {
            environment: required("app.env")?,
            host: required("http.host")?,
            port,
            database_url: required("database.url")?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}
