//! HTTP handlers for door access and the audit log.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::access::ListAccessLogQuery;
use crate::domain::foundation::{AuthenticatedUser, MemberId};

use super::dto::{
    AccessLogEntryResponse, AccessLogParams, EnterRequest, ManualAccessRequest, VerdictResponse,
    VerifyParams,
};

/// Door entry is recorded on the staff account operating the reader.
fn require_staff(user: &AuthenticatedUser) -> Result<(), ApiError> {
    if user.role.is_staff() {
        Ok(())
    } else {
        tracing::warn!(user_id = %user.user_id, role = %user.role, "entry attempt from non-staff caller");
        Err(ApiError::forbidden())
    }
}

/// GET /api/access/verify?token= - Dry run, nothing is logged
pub async fn verify_token(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    let verdict = state.access_verifier().verify(&params.token).await;
    Json(VerdictResponse::from(verdict))
}

/// POST /api/access/enter - QR entry at the door, always logged
pub async fn enter(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<EnterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_staff(&user)?;

    let outcome = state.access_verifier().enter(&req.token).await;
    Ok(Json(VerdictResponse::from(outcome)))
}

/// POST /api/accesos - Manual front-desk entry by socio_id or documento
pub async fn register_access(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<ManualAccessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_staff(&user)?;
    let identifier = req.identifier()?;

    let outcome = state.access_verifier().register_access(&identifier).await;
    Ok(Json(VerdictResponse::from(outcome)))
}

/// GET /api/accesos?socio_id=&limite= - Audit log, newest first
pub async fn list_access_log(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<AccessLogParams>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id = params
        .socio_id
        .as_deref()
        .map(|raw| parse_id::<MemberId>(raw, "socio_id"))
        .transpose()?;

    let entries = state
        .list_access_log_handler()
        .handle(ListAccessLogQuery {
            actor: user,
            member_id,
            limit: params.limite,
        })
        .await?;

    let body: Vec<AccessLogEntryResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(body))
}
