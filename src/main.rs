//! gymgate server binary.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use gymgate::adapters::auth::JwtSessionValidator;
use gymgate::adapters::http::{build_router, AppState};
use gymgate::adapters::memory::{
    InMemoryAccessLogRepository, InMemoryAccessTokenRepository, InMemoryMemberRepository,
    InMemoryRosterRepository, InMemoryRoutineRepository,
};
use gymgate::adapters::postgres::{
    self, PostgresAccessLogRepository, PostgresAccessTokenRepository, PostgresMemberRepository,
    PostgresRosterRepository, PostgresRoutineRepository,
};
use gymgate::adapters::qr::PngQrRenderer;
use gymgate::config::{AppConfig, ConfigError, StorageBackend, ValidationError};
use gymgate::domain::foundation::{DomainError, GymClock};
use gymgate::ports::{
    AccessLogRepository, AccessTokenRepository, MemberRepository, RosterRepository,
    RoutineRepository,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] DomainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// The five repositories, whichever backend provides them.
struct Repositories {
    members: Arc<dyn MemberRepository>,
    rosters: Arc<dyn RosterRepository>,
    access_tokens: Arc<dyn AccessTokenRepository>,
    access_log: Arc<dyn AccessLogRepository>,
    routines: Arc<dyn RoutineRepository>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let clock = config.access.clock()?;
    let repos = open_storage(&config).await?;

    let validator = JwtSessionValidator::new(
        &config.auth.jwt_secret,
        config.auth.issuer.as_deref(),
        config.auth.audience.as_deref(),
    );

    let state = app_state(repos, &config, clock, validator);
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "gymgate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gymgate shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn open_storage(config: &AppConfig) -> Result<Repositories, StartupError> {
    match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; all data is lost on restart");
            Ok(Repositories {
                members: Arc::new(InMemoryMemberRepository::new()),
                rosters: Arc::new(InMemoryRosterRepository::new()),
                access_tokens: Arc::new(InMemoryAccessTokenRepository::new()),
                access_log: Arc::new(InMemoryAccessLogRepository::new()),
                routines: Arc::new(InMemoryRoutineRepository::new()),
            })
        }
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            if config.database.run_migrations {
                postgres::run_migrations(&pool).await?;
            }
            Ok(Repositories {
                members: Arc::new(PostgresMemberRepository::new(pool.clone())),
                rosters: Arc::new(PostgresRosterRepository::new(pool.clone())),
                access_tokens: Arc::new(PostgresAccessTokenRepository::new(pool.clone())),
                access_log: Arc::new(PostgresAccessLogRepository::new(pool.clone())),
                routines: Arc::new(PostgresRoutineRepository::new(pool)),
            })
        }
    }
}

fn app_state(
    repos: Repositories,
    config: &AppConfig,
    clock: GymClock,
    validator: JwtSessionValidator,
) -> AppState {
    AppState::new(
        repos.members,
        repos.rosters,
        repos.access_tokens,
        repos.access_log,
        repos.routines,
        Arc::new(PngQrRenderer::new(config.access.qr_size_px)),
        Arc::new(validator),
        clock,
    )
    .with_expiring_soon_days(config.access.expiring_soon_days)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
