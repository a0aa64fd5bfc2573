//! Member handlers.
//!
//! ## Commands
//! - Register a member (issues the first access token)
//! - Administrator edit of status, expiry, and plan
//!
//! ## Queries
//! - Get a member with their effective standing

mod get_member;
mod register_member;
mod update_member;

// Commands
pub use register_member::{RegisterMemberCommand, RegisterMemberHandler, RegisterMemberResult};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler};

// Queries
pub use get_member::{GetMemberHandler, GetMemberQuery, MemberView};
