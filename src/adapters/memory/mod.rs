//! In-memory adapters for every storage port.
//!
//! Used for development (`database.backend = "memory"`) and tests. They
//! honour the same contracts as the PostgreSQL adapters, including per-class
//! exclusivity of roster leases and atomic token rotation.

mod access_log_repository;
mod access_token_repository;
mod member_repository;
mod roster_repository;
mod routine_repository;

pub use access_log_repository::InMemoryAccessLogRepository;
pub use access_token_repository::InMemoryAccessTokenRepository;
pub use member_repository::InMemoryMemberRepository;
pub use roster_repository::InMemoryRosterRepository;
pub use routine_repository::InMemoryRoutineRepository;
