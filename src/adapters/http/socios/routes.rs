//! HTTP routes for member endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{get_member, member_qr, register_member, rotate_member_token, update_member};

/// Routes mounted under `/api/socios`.
pub fn socio_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_member))
        .route("/:id", get(get_member).put(update_member))
        .route("/:id/qr.png", get(member_qr))
        .route("/:id/qr/rotate", post(rotate_member_token))
}
