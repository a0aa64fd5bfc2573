//! HTTP adapter - the REST API consumed by the gym console and door readers.
//!
//! One module per resource (`socios`, `clases`, `reservas`, `accesos`,
//! `rutinas`), each with its DTOs, handlers and routes. `router` puts them
//! together behind bearer authentication.

pub mod accesos;
pub mod clases;
pub mod error;
pub mod health;
pub mod middleware;
pub mod reservas;
pub mod router;
pub mod rutinas;
pub mod socios;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, build_router};
pub use state::AppState;
