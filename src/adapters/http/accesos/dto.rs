//! Request and response bodies for `/api/access` and `/api/accesos`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::access::{EntryOutcome, ManualIdentifier};
use crate::domain::access::{AccessLogEntry, AccessVerdict, MemberSummary};
use crate::domain::foundation::{AccessLogId, MemberId, Timestamp};
use crate::domain::membership::MemberStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyParams {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnterRequest {
    #[serde(default)]
    pub token: String,
}

/// Front desk identifies the member by id or by documento, not both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualAccessRequest {
    #[serde(default)]
    pub socio_id: Option<MemberId>,
    #[serde(default)]
    pub documento: Option<String>,
}

impl ManualAccessRequest {
    pub fn identifier(self) -> Result<ManualIdentifier, ApiError> {
        match (self.socio_id, self.documento) {
            (Some(id), None) => Ok(ManualIdentifier::MemberId(id)),
            (None, Some(doc)) if !doc.trim().is_empty() => Ok(ManualIdentifier::Documento(doc)),
            (Some(_), Some(_)) => Err(ApiError::validation(
                "socio_id",
                "send either socio_id or documento, not both",
            )),
            _ => Err(ApiError::validation(
                "socio_id",
                "socio_id or documento is required",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessLogParams {
    #[serde(default)]
    pub socio_id: Option<String>,
    #[serde(default)]
    pub limite: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// What the door display shows about the member.
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummaryResponse {
    pub id: MemberId,
    pub documento: String,
    pub nombre: String,
    pub estado: MemberStatus,
    pub fecha_vencimiento: NaiveDate,
    pub plan: Option<String>,
    pub dias_para_vencer: i64,
}

impl From<MemberSummary> for MemberSummaryResponse {
    fn from(m: MemberSummary) -> Self {
        Self {
            id: m.id,
            documento: m.documento,
            nombre: m.nombre,
            estado: m.status,
            fecha_vencimiento: m.expires_on,
            plan: m.plan,
            dias_para_vencer: m.days_to_expiry,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictResponse {
    pub permitido: bool,
    pub codigo: &'static str,
    pub motivo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socio: Option<MemberSummaryResponse>,
    /// Present on entry endpoints: false when the audit write failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrado: Option<bool>,
}

impl From<AccessVerdict> for VerdictResponse {
    fn from(verdict: AccessVerdict) -> Self {
        Self {
            permitido: verdict.permitted,
            codigo: verdict.reason.code(),
            motivo: verdict.reason.motivo(),
            socio: verdict.member.map(Into::into),
            registrado: None,
        }
    }
}

impl From<EntryOutcome> for VerdictResponse {
    fn from(outcome: EntryOutcome) -> Self {
        Self {
            registrado: Some(outcome.logged),
            ..VerdictResponse::from(outcome.verdict)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntryResponse {
    pub id: AccessLogId,
    pub socio_id: Option<MemberId>,
    pub fecha_hora: Timestamp,
    pub permitido: bool,
    pub codigo: &'static str,
    pub motivo: &'static str,
    pub canal: &'static str,
}

impl From<AccessLogEntry> for AccessLogEntryResponse {
    fn from(entry: AccessLogEntry) -> Self {
        Self {
            id: entry.id,
            socio_id: entry.member_id,
            fecha_hora: entry.occurred_at,
            permitido: entry.permitted,
            codigo: entry.reason.code(),
            motivo: entry.reason.motivo(),
            canal: entry.channel.as_str(),
        }
    }
}
