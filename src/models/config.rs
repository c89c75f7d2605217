use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::pagination::PaginationConfig;

/// Configuration options for the catalog service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl ServerConfig {
    /// Load configuration from `config/default.yaml`, the optional
    /// `config/{APP_ENV}.yaml` overlay and `APP__*` environment variables,
    /// in that order of precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "app.db")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
