//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, time, errors, roles)
//! - `membership` - Member profiles and membership standing
//! - `scheduling` - Classes, reservations, capacity, class lifecycle
//! - `access` - QR tokens, door verdicts, audit log
//! - `routine` - Routines and exercise review

pub mod access;
pub mod foundation;
pub mod membership;
pub mod routine;
pub mod scheduling;
