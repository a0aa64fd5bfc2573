//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. Each handler receives the authenticated caller explicitly and
//! checks its role before touching storage.

pub mod access;
pub mod member;
pub mod routine;
pub mod scheduling;
