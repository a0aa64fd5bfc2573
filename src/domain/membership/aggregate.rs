//! Member aggregate entity.
//!
//! A member (socio) is identified internally by `MemberId` and externally by
//! `documento`, the identity document number the front desk types in for
//! manual entry.
//!
//! # Invariants
//!
//! - `documento` is trimmed and non-empty; uniqueness is enforced by storage
//! - `nombre` is trimmed and non-empty

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp};

use super::{MemberError, MemberStatus};

/// Member aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,

    /// External identity document number.
    pub documento: String,

    pub nombre: String,

    /// Recorded status. See `MembershipStatusEvaluator` for the effective one.
    pub status: MemberStatus,

    /// Last calendar day on which the membership is valid.
    pub expires_on: NaiveDate,

    pub plan: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields an administrator may edit on an existing member.
///
/// `plan: Some(None)` clears the plan; `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct MemberChanges {
    pub status: Option<MemberStatus>,
    pub expires_on: Option<NaiveDate>,
    pub plan: Option<Option<String>>,
}

impl MemberChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.expires_on.is_none() && self.plan.is_none()
    }
}

impl Member {
    /// Registers a new member in `activo` status.
    pub fn register(
        documento: impl Into<String>,
        nombre: impl Into<String>,
        expires_on: NaiveDate,
        plan: Option<String>,
    ) -> Result<Self, MemberError> {
        let documento = documento.into().trim().to_string();
        if documento.is_empty() {
            return Err(MemberError::validation("documento", "cannot be empty"));
        }
        let nombre = nombre.into().trim().to_string();
        if nombre.is_empty() {
            return Err(MemberError::validation("nombre", "cannot be empty"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: MemberId::new(),
            documento,
            nombre,
            status: MemberStatus::Active,
            expires_on,
            plan: normalize_plan(plan),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies an administrator edit. Returns true if anything changed.
    pub fn apply(&mut self, changes: MemberChanges) -> bool {
        let before = self.clone();

        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(expires_on) = changes.expires_on {
            self.expires_on = expires_on;
        }
        if let Some(plan) = changes.plan {
            self.plan = normalize_plan(plan);
        }

        let changed = *self != before;
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }
}

fn normalize_plan(plan: Option<String>) -> Option<String> {
    plan.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn register_trims_and_activates() {
        let member = Member::register(" 12345678 ", " Ana Díaz ", date(2025, 12, 31), None).unwrap();

        assert_eq!(member.documento, "12345678");
        assert_eq!(member.nombre, "Ana Díaz");
        assert_eq!(member.status, MemberStatus::Active);
    }

    #[test]
    fn register_rejects_blank_documento() {
        let err = Member::register("  ", "Ana", date(2025, 12, 31), None).unwrap_err();
        assert!(matches!(err, MemberError::ValidationFailed { ref field, .. } if field == "documento"));
    }

    #[test]
    fn register_drops_blank_plan() {
        let member = Member::register("1", "Ana", date(2025, 1, 1), Some("   ".into())).unwrap();
        assert_eq!(member.plan, None);
    }

    #[test]
    fn apply_reports_whether_anything_changed() {
        let mut member = Member::register("1", "Ana", date(2025, 1, 1), Some("mensual".into())).unwrap();

        assert!(!member.apply(MemberChanges::default()));
        assert!(member.apply(MemberChanges {
            status: Some(MemberStatus::Suspended),
            ..Default::default()
        }));
        assert_eq!(member.status, MemberStatus::Suspended);

        assert!(member.apply(MemberChanges {
            plan: Some(None),
            ..Default::default()
        }));
        assert_eq!(member.plan, None);
    }
}
