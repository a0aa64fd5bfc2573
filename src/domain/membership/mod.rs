//! Membership domain module.
//!
//! Member profiles and the evaluation of whether a member is in good
//! standing on a given day.
//!
//! # Module Structure
//!
//! - `aggregate` - Member aggregate entity
//! - `status` - Recorded `estado`
//! - `standing` - MembershipStatusEvaluator (recorded status + expiry)
//! - `errors` - MemberError

mod aggregate;
mod errors;
mod standing;
mod status;

pub use aggregate::{Member, MemberChanges};
pub use errors::MemberError;
pub use standing::{EffectiveStatus, MembershipStanding, MembershipStatusEvaluator};
pub use status::MemberStatus;
