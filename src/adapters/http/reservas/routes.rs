//! HTTP routes for reservation endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{cancel_reservation, create_reservation, list_reservations, mark_attendance};

/// Routes mounted under `/api/reservas`.
pub fn reserva_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/:id/cancelar", put(cancel_reservation))
        .route("/:id/asistencia", put(mark_attendance))
}
