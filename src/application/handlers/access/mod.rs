//! Access control handlers.
//!
//! ## Services
//! - `AccessTokenService` - issue, rotate, resolve QR tokens
//! - `AccessVerifier` - door verdicts for QR and manual entry
//!
//! ## Commands
//! - Rotate a member's QR token
//!
//! ## Queries
//! - Render the live token as a PNG
//! - Read the audit log

mod access_verifier;
mod list_access_log;
mod render_qr;
mod rotate_token;
mod token_service;

pub use access_verifier::{AccessVerifier, EntryOutcome, ManualIdentifier};
pub use token_service::AccessTokenService;

// Commands
pub use rotate_token::{RotateTokenCommand, RotateTokenHandler};

// Queries
pub use list_access_log::{ListAccessLogHandler, ListAccessLogQuery};
pub use render_qr::{RenderQrHandler, RenderQrQuery};
