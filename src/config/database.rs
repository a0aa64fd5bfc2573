//! Database configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the service keeps its state.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on restart. Development and tests only.
    #[default]
    Memory,
    Postgres,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// PostgreSQL connection URL, required for the postgres backend
    #[serde(default)]
    pub url: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,

    /// Run migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    pub fn is_postgres(&self) -> bool {
        self.backend == StorageBackend::Postgres
    }

    /// Validate database configuration
    ///
    /// Connection settings are only checked for the postgres backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_postgres() {
            return Ok(());
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    5
}

fn default_max_connections() -> u32 {
    20
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}
