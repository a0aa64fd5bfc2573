//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMemberRepository` - members, unique `documento`
//! - `PostgresRosterRepository` - classes and reservations, row-locked leases
//! - `PostgresAccessTokenRepository` - one token row per member, upsert rotation
//! - `PostgresAccessLogRepository` - append-only audit log
//! - `PostgresRoutineRepository` - routines with legacy review mapping

mod access_log_repository;
mod access_token_repository;
mod member_repository;
mod roster_repository;
mod routine_repository;

pub use access_log_repository::PostgresAccessLogRepository;
pub use access_token_repository::PostgresAccessTokenRepository;
pub use member_repository::PostgresMemberRepository;
pub use roster_repository::PostgresRosterRepository;
pub use routine_repository::PostgresRoutineRepository;

use std::str::FromStr;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| db_error("connect to database", e))
}

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    tracing::info!("running database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("database migrations complete");
    Ok(())
}

pub(crate) fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "failed to {}", action);
    DomainError::database(format!("Failed to {}: {}", action, e))
}

/// Parses an enum column, treating unknown values as corrupt data.
pub(crate) fn stored_value<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid stored {}: {}", column, e)))
}
