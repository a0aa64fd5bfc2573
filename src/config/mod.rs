//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `GYMGATE` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use gymgate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod access;
mod auth;
mod database;
mod error;
mod server;

pub use access::AccessConfig;
pub use auth::AuthConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend and PostgreSQL pool settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session token verification
    pub auth: AuthConfig,

    /// Door access, QR rendering and the gym's calendar
    #[serde(default)]
    pub access: AccessConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GYMGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `GYMGATE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GYMGATE__DATABASE__BACKEND=postgres` -> `database.backend = postgres`
    /// - `GYMGATE__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GYMGATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.access.validate()?;

        if self.is_production() && !self.database.is_postgres() {
            return Err(ValidationError::MemoryBackendInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
