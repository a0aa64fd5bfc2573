//! gymgate - class reservations and door access control for a gym.
//!
//! Members book seats in capacity-limited classes; staff cancel classes and
//! record attendance; a QR token per member opens the door, and every door
//! decision lands in an append-only audit log. Instructors review the
//! exercises in members' routines.
//!
//! Layout follows ports and adapters: `domain` holds the rules, `ports` the
//! storage and collaborator traits, `application` the command and query
//! handlers, `adapters` the PostgreSQL, in-memory, auth, QR and HTTP
//! implementations, and `config` the environment-driven settings.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
