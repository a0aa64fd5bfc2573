//! Instructor review of a routine exercise.
//!
//! Stored data predates the tagged state and may carry the review as free
//! text (`APROBADO`), as a numeric `estado_id`, or not at all. All of it is
//! folded into `ReviewStatus` once, when a row is read; the rest of the
//! code only ever sees the enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, Timestamp, UserId, ValidationError};

/// Review state of one exercise.
///
/// ```text
/// pendiente ──> aprobado <──> rechazado
///        └─────────────────────^
/// ```
///
/// A reviewed exercise can be reviewed again with either verdict, but never
/// returns to `pendiente`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobado")]
    Approved,
    #[serde(rename = "rechazado")]
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pendiente",
            ReviewStatus::Approved => "aprobado",
            ReviewStatus::Rejected => "rechazado",
        }
    }

    /// Legacy numeric encoding: 1 pending, 2 approved, 3 rejected.
    pub fn legacy_id(&self) -> i16 {
        match self {
            ReviewStatus::Pending => 1,
            ReviewStatus::Approved => 2,
            ReviewStatus::Rejected => 3,
        }
    }

    /// Maps whatever a stored row carries onto the tagged state.
    ///
    /// Text wins over the numeric id. Anything unrecognised, including a row
    /// with neither, is pending.
    pub fn from_legacy(text: Option<&str>, estado_id: Option<i16>) -> Self {
        if let Some(status) = text.and_then(Self::from_text) {
            return status;
        }
        match estado_id {
            Some(2) => ReviewStatus::Approved,
            Some(3) => ReviewStatus::Rejected,
            _ => ReviewStatus::Pending,
        }
    }

    fn from_text(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "pendiente" | "pending" => Some(ReviewStatus::Pending),
            "aprobado" | "approved" => Some(ReviewStatus::Approved),
            "rechazado" | "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for ReviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        !matches!(target, ReviewStatus::Pending)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        vec![ReviewStatus::Approved, ReviewStatus::Rejected]
    }
}

/// Outcome an instructor can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewVerdict {
    #[serde(rename = "aprobado")]
    Approved,
    #[serde(rename = "rechazado")]
    Rejected,
}

impl From<ReviewVerdict> for ReviewStatus {
    fn from(verdict: ReviewVerdict) -> Self {
        match verdict {
            ReviewVerdict::Approved => ReviewStatus::Approved,
            ReviewVerdict::Rejected => ReviewStatus::Rejected,
        }
    }
}

impl FromStr for ReviewVerdict {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ReviewStatus::from_text(s) {
            Some(ReviewStatus::Approved) => Ok(ReviewVerdict::Approved),
            Some(ReviewStatus::Rejected) => Ok(ReviewVerdict::Rejected),
            _ => Err(ValidationError::invalid_format(
                "estado",
                "review must be 'aprobado' or 'rechazado'",
            )),
        }
    }
}

/// Review attached to an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseReview {
    pub status: ReviewStatus,
    pub notes: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
}

impl ExerciseReview {
    pub fn pending() -> Self {
        Self {
            status: ReviewStatus::Pending,
            notes: None,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    /// Records a verdict, replacing any earlier review.
    pub fn record(
        &mut self,
        verdict: ReviewVerdict,
        notes: Option<String>,
        reviewer: UserId,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(verdict.into())?;
        self.notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(Timestamp::now());
        Ok(())
    }
}

impl Default for ExerciseReview {
    fn default() -> Self {
        Self::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> UserId {
        UserId::new("instructor-1").unwrap()
    }

    #[test]
    fn legacy_text_is_case_insensitive() {
        assert_eq!(ReviewStatus::from_legacy(Some("APROBADO"), None), ReviewStatus::Approved);
        assert_eq!(ReviewStatus::from_legacy(Some("Rechazado"), None), ReviewStatus::Rejected);
        assert_eq!(ReviewStatus::from_legacy(Some("approved"), None), ReviewStatus::Approved);
    }

    #[test]
    fn legacy_id_used_when_text_missing_or_unknown() {
        assert_eq!(ReviewStatus::from_legacy(None, Some(2)), ReviewStatus::Approved);
        assert_eq!(ReviewStatus::from_legacy(Some("???"), Some(3)), ReviewStatus::Rejected);
        assert_eq!(ReviewStatus::from_legacy(None, Some(1)), ReviewStatus::Pending);
    }

    #[test]
    fn text_wins_over_id() {
        assert_eq!(ReviewStatus::from_legacy(Some("APROBADO"), Some(3)), ReviewStatus::Approved);
    }

    #[test]
    fn absent_or_garbage_defaults_to_pending() {
        assert_eq!(ReviewStatus::from_legacy(None, None), ReviewStatus::Pending);
        assert_eq!(ReviewStatus::from_legacy(Some(""), Some(42)), ReviewStatus::Pending);
    }

    #[test]
    fn legacy_ids_match_mapping() {
        for status in [ReviewStatus::Pending, ReviewStatus::Approved, ReviewStatus::Rejected] {
            assert_eq!(ReviewStatus::from_legacy(None, Some(status.legacy_id())), status);
        }
    }

    #[test]
    fn review_can_be_repeated_with_other_verdict() {
        let mut review = ExerciseReview::pending();
        review.record(ReviewVerdict::Approved, None, reviewer()).unwrap();
        review
            .record(ReviewVerdict::Rejected, Some(" mala técnica ".into()), reviewer())
            .unwrap();

        assert_eq!(review.status, ReviewStatus::Rejected);
        assert_eq!(review.notes.as_deref(), Some("mala técnica"));
        assert!(review.reviewed_at.is_some());
    }

    #[test]
    fn reviewed_exercise_cannot_return_to_pending() {
        assert!(!ReviewStatus::Approved.can_transition_to(&ReviewStatus::Pending));
        assert!(ReviewStatus::Rejected.can_transition_to(&ReviewStatus::Approved));
    }

    #[test]
    fn verdict_parses_spanish_and_english() {
        assert_eq!("APROBADO".parse::<ReviewVerdict>().unwrap(), ReviewVerdict::Approved);
        assert_eq!("rejected".parse::<ReviewVerdict>().unwrap(), ReviewVerdict::Rejected);
        assert!("pendiente".parse::<ReviewVerdict>().is_err());
    }
}
