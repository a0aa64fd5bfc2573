//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process repositories for development and tests
//! - `postgres` - sqlx repositories and the per-class row lock
//! - `auth` - Bearer token validation (JWT, mock)
//! - `qr` - PNG rendering of access tokens
//! - `http` - axum REST API

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod qr;

pub use http::{build_router, AppState};
