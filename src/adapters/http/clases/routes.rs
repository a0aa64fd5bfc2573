//! HTTP routes for class endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{cancel_class, class_roster, create_class, get_class, list_classes};

/// Routes mounted under `/api/clases`.
pub fn clase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route("/:id", get(get_class).delete(cancel_class))
        .route("/:id/reservas", get(class_roster))
}
