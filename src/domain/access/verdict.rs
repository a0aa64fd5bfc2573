//! Access decisions.
//!
//! `decide` is the single source of membership-based access rules. Both the
//! QR path and the manual front-desk path call it, so a given member gets
//! the same answer no matter how they were identified.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{Member, MemberStatus, MembershipStatusEvaluator};

/// Why a verdict came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictReason {
    Granted,
    TokenInvalid,
    MemberNotFound,
    Suspended,
    Inactive,
    Expired,
    /// Storage could not be reached; entry is denied rather than guessed.
    Unavailable,
}

impl VerdictReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            VerdictReason::Granted => "ACCESS_GRANTED",
            VerdictReason::TokenInvalid => "TOKEN_INVALID",
            VerdictReason::MemberNotFound => "MEMBER_NOT_FOUND",
            VerdictReason::Suspended => "MEMBERSHIP_SUSPENDED",
            VerdictReason::Inactive => "MEMBER_INACTIVE",
            VerdictReason::Expired => "MEMBERSHIP_EXPIRED",
            VerdictReason::Unavailable => "VERIFICATION_UNAVAILABLE",
        }
    }

    /// Human-readable reason shown at the door.
    pub fn motivo(&self) -> &'static str {
        match self {
            VerdictReason::Granted => "acceso permitido",
            VerdictReason::TokenInvalid => "token inválido",
            VerdictReason::MemberNotFound => "socio no encontrado",
            VerdictReason::Suspended => "socio suspendido",
            VerdictReason::Inactive => "socio inactivo",
            VerdictReason::Expired => "membresía vencida",
            VerdictReason::Unavailable => "verificación no disponible",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            VerdictReason::Granted,
            VerdictReason::TokenInvalid,
            VerdictReason::MemberNotFound,
            VerdictReason::Suspended,
            VerdictReason::Inactive,
            VerdictReason::Expired,
            VerdictReason::Unavailable,
        ]
        .into_iter()
        .find(|r| r.code() == code)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, VerdictReason::Granted)
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.motivo())
    }
}

/// What the door display shows about the member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub id: MemberId,
    pub documento: String,
    pub nombre: String,
    pub status: MemberStatus,
    pub expires_on: NaiveDate,
    pub plan: Option<String>,
    pub days_to_expiry: i64,
}

/// Permit or deny, with a reason. There is no third outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessVerdict {
    pub permitted: bool,
    pub reason: VerdictReason,
    pub member: Option<MemberSummary>,
}

impl AccessVerdict {
    /// A denial with no member attached.
    pub fn denied(reason: VerdictReason) -> Self {
        Self {
            permitted: false,
            reason,
            member: None,
        }
    }

    pub fn member_id(&self) -> Option<MemberId> {
        self.member.as_ref().map(|m| m.id)
    }

    pub fn motivo(&self) -> &'static str {
        self.reason.motivo()
    }
}

/// Decides whether `member` may enter on `today`.
///
/// First match wins: suspended, inactive, expired, granted. The recorded
/// status is checked before the date so a suspended member with an expired
/// date is reported as suspended.
pub fn decide(member: &Member, today: NaiveDate) -> AccessVerdict {
    let standing = MembershipStatusEvaluator::evaluate(member, today);

    let reason = match member.status {
        MemberStatus::Suspended => VerdictReason::Suspended,
        MemberStatus::Inactive => VerdictReason::Inactive,
        MemberStatus::Active if standing.expired => VerdictReason::Expired,
        MemberStatus::Active => VerdictReason::Granted,
    };

    AccessVerdict {
        permitted: reason.is_granted(),
        reason,
        member: Some(MemberSummary {
            id: member.id,
            documento: member.documento.clone(),
            nombre: member.nombre.clone(),
            status: member.status,
            expires_on: member.expires_on,
            plan: member.plan.clone(),
            days_to_expiry: standing.days_to_expiry,
        }),
    }
}
