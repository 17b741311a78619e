use std::time::Duration;

use serde::Deserialize;

use crate::db::PoolOptions;

/// Runtime configuration for the store and the importer binary.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or `file:` URI.
    pub database_url: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,
}

fn default_max_pool_size() -> u32 {
    8
}

fn default_connection_timeout_secs() -> u64 {
    5
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

impl ServerConfig {
    /// Pool settings derived from this configuration.
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.max_pool_size,
            connection_timeout: Duration::from_secs(self.connection_timeout_secs),
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}

#[cfg(feature = "cli")]
impl ServerConfig {
    /// Environment prefix; `TASTERANKER__DATABASE_URL` overrides `database_url`.
    pub const ENV_PREFIX: &'static str = "TASTERANKER";

    /// Load settings from an optional YAML file, then environment overrides.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
