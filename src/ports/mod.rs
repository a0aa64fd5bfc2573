//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `MemberRepository` - Member profiles
//! - `RosterRepository` / `RosterLease` - Classes and reservations under a
//!   per-class exclusive lease
//! - `AccessTokenRepository` - One live QR token per member
//! - `AccessLogRepository` - Append-only door audit log
//! - `RoutineRepository` - Routines and exercise reviews
//!
//! ## Collaborator Ports
//!
//! - `SessionValidator` - Bearer token to authenticated caller
//! - `QrRenderer` - Token payload to PNG

mod access_log_repository;
mod access_token_repository;
mod member_repository;
mod qr_renderer;
mod roster_repository;
mod routine_repository;
mod session_validator;

pub use access_log_repository::{
    AccessLogQuery, AccessLogRepository, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT,
};
pub use access_token_repository::AccessTokenRepository;
pub use member_repository::MemberRepository;
pub use qr_renderer::QrRenderer;
pub use roster_repository::{ClassSummary, RosterLease, RosterRepository};
pub use routine_repository::RoutineRepository;
pub use session_validator::SessionValidator;
