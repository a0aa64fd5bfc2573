//! HTTP adapter for door access: QR verification and entry, manual
//! front-desk entry, and the audit log.
//!
//! Verdict endpoints answer `200` whether entry is permitted or denied; a
//! denial is a normal outcome carried in the body, never an HTTP error.

mod dto;
mod handlers;
mod routes;

pub use dto::{AccessLogEntryResponse, EnterRequest, ManualAccessRequest, VerdictResponse};
pub use routes::{access_routes, acceso_routes};
