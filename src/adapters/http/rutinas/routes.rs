//! HTTP routes for routine endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_routine, get_routine, review_exercise};

/// Routes mounted under `/api/rutinas`.
pub fn rutina_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_routine))
        .route("/:id", get(get_routine))
        .route("/ejercicios/:id/revision", put(review_exercise))
}
