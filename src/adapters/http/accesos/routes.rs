//! HTTP routes for door access endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{enter, list_access_log, register_access, verify_token};

/// Routes mounted under `/api/access`.
pub fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify_token))
        .route("/enter", post(enter))
}

/// Routes mounted under `/api/accesos`.
pub fn acceso_routes() -> Router<AppState> {
    Router::new().route("/", get(list_access_log).post(register_access))
}
