//! Request and response bodies for `/api/socios`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::member::MemberView;
use crate::domain::access::AccessToken;
use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{EffectiveStatus, Member, MemberChanges, MemberStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMemberRequest {
    pub documento: String,
    pub nombre: String,
    pub fecha_vencimiento: NaiveDate,
    #[serde(default)]
    pub plan: Option<String>,
}

/// Partial update. An explicit `"plan": null` clears the plan; an absent
/// `plan` leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub estado: Option<MemberStatus>,
    #[serde(default)]
    pub fecha_vencimiento: Option<NaiveDate>,
    #[serde(default, deserialize_with = "present")]
    pub plan: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateMemberRequest> for MemberChanges {
    fn from(req: UpdateMemberRequest) -> Self {
        MemberChanges {
            status: req.estado,
            expires_on: req.fecha_vencimiento,
            plan: req.plan,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct StandingResponse {
    pub estado_efectivo: EffectiveStatus,
    pub dias_para_vencer: i64,
    pub vencida: bool,
    pub vence_pronto: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: MemberId,
    pub documento: String,
    pub nombre: String,
    pub estado: MemberStatus,
    pub fecha_vencimiento: NaiveDate,
    pub plan: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub standing: Option<StandingResponse>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            documento: member.documento,
            nombre: member.nombre,
            estado: member.status,
            fecha_vencimiento: member.expires_on,
            plan: member.plan,
            created_at: member.created_at,
            updated_at: member.updated_at,
            standing: None,
        }
    }
}

impl From<MemberView> for MemberResponse {
    fn from(view: MemberView) -> Self {
        let standing = StandingResponse {
            estado_efectivo: view.standing.status,
            dias_para_vencer: view.standing.days_to_expiry,
            vencida: view.standing.expired,
            vence_pronto: view.expiring_soon,
        };
        Self {
            standing: Some(standing),
            ..MemberResponse::from(view.member)
        }
    }
}

/// The token is returned so the caller can re-render the QR without a
/// second round trip.
#[derive(Debug, Clone, Serialize)]
pub struct RotateTokenResponse {
    pub socio_id: MemberId,
    pub token: String,
    pub emitido_at: Timestamp,
}

impl From<AccessToken> for RotateTokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            socio_id: token.member_id,
            token: token.token.as_str().to_string(),
            emitido_at: token.issued_at,
        }
    }
}
