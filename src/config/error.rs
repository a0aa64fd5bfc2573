//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    #[error("In-memory storage is not allowed in production")]
    MemoryBackendInProduction,

    #[error("UTC offset out of range: {0} minutes")]
    InvalidUtcOffset(i32),

    #[error("QR size must be between {min} and {max} pixels")]
    InvalidQrSize { min: u32, max: u32 },
}
