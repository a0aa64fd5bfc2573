//! Physical access control domain: QR tokens, door verdicts, audit log.
//!
//! # Module Structure
//!
//! - `token` - TokenValue and the member's live AccessToken
//! - `verdict` - VerdictReason, AccessVerdict, and the shared `decide` rule
//! - `log` - AccessLogEntry and AccessChannel
//! - `errors` - AccessError

mod errors;
mod log;
mod token;
mod verdict;

pub use errors::AccessError;
pub use log::{AccessChannel, AccessLogEntry};
pub use token::{AccessToken, TokenValue, MAX_TOKEN_LEN};
pub use verdict::{decide, AccessVerdict, MemberSummary, VerdictReason};
