//! Effective membership standing.
//!
//! The recorded `estado` and the expiry date can disagree: a member marked
//! `activo` whose date has passed is not in good standing. This module is
//! the only place where the two are combined.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Member, MemberStatus};

/// Effective status after combining recorded status and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Active,
    Suspended,
    Inactive,
}

/// Result of evaluating a member on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStanding {
    pub status: EffectiveStatus,

    /// Days from today until expiry. Zero on the last valid day, negative
    /// once expired.
    pub days_to_expiry: i64,

    /// True when the expiry date is strictly before today.
    pub expired: bool,
}

impl MembershipStanding {
    pub fn is_active(&self) -> bool {
        self.status == EffectiveStatus::Active
    }

    /// True for an active membership that runs out within `days`.
    pub fn is_expiring_within(&self, days: u32) -> bool {
        self.is_active() && self.days_to_expiry <= i64::from(days)
    }
}

/// Pure evaluation of a member's standing.
pub struct MembershipStatusEvaluator;

impl MembershipStatusEvaluator {
    pub fn evaluate(member: &Member, today: NaiveDate) -> MembershipStanding {
        let days_to_expiry = (member.expires_on - today).num_days();
        let expired = member.expires_on < today;

        let status = match member.status {
            MemberStatus::Suspended => EffectiveStatus::Suspended,
            MemberStatus::Inactive => EffectiveStatus::Inactive,
            MemberStatus::Active if expired => EffectiveStatus::Inactive,
            MemberStatus::Active => EffectiveStatus::Active,
        };

        MembershipStanding {
            status,
            days_to_expiry,
            expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(status: MemberStatus, expires_on: NaiveDate) -> Member {
        let mut m = Member::register("1000", "Test", expires_on, None).unwrap();
        m.status = status;
        m
    }

    #[test]
    fn active_member_with_future_date_is_active() {
        let today = date(2025, 6, 1);
        let standing =
            MembershipStatusEvaluator::evaluate(&member(MemberStatus::Active, date(2025, 6, 11)), today);

        assert_eq!(standing.status, EffectiveStatus::Active);
        assert_eq!(standing.days_to_expiry, 10);
        assert!(!standing.expired);
    }

    #[test]
    fn expiry_day_itself_is_still_valid() {
        let today = date(2025, 6, 1);
        let standing = MembershipStatusEvaluator::evaluate(&member(MemberStatus::Active, today), today);

        assert!(standing.is_active());
        assert_eq!(standing.days_to_expiry, 0);
    }

    #[test]
    fn nominally_active_but_expired_is_inactive() {
        let today = date(2025, 6, 1);
        let standing =
            MembershipStatusEvaluator::evaluate(&member(MemberStatus::Active, date(2025, 5, 31)), today);

        assert_eq!(standing.status, EffectiveStatus::Inactive);
        assert_eq!(standing.days_to_expiry, -1);
        assert!(standing.expired);
    }

    #[test]
    fn suspension_wins_over_valid_date() {
        let today = date(2025, 6, 1);
        let standing = MembershipStatusEvaluator::evaluate(
            &member(MemberStatus::Suspended, date(2026, 1, 1)),
            today,
        );
        assert_eq!(standing.status, EffectiveStatus::Suspended);
    }

    #[test]
    fn expiring_within_window() {
        let today = date(2025, 6, 1);
        let soon = MembershipStatusEvaluator::evaluate(&member(MemberStatus::Active, date(2025, 6, 5)), today);
        let later = MembershipStatusEvaluator::evaluate(&member(MemberStatus::Active, date(2025, 7, 5)), today);

        assert!(soon.is_expiring_within(7));
        assert!(!later.is_expiring_within(7));
    }
}
