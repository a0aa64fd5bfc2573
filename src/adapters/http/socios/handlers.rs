//! HTTP handlers for member endpoints.

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::access::{RenderQrQuery, RotateTokenCommand};
use crate::application::handlers::member::{
    GetMemberQuery, RegisterMemberCommand, UpdateMemberCommand,
};
use crate::domain::foundation::MemberId;

use super::dto::{MemberResponse, RegisterMemberRequest, RotateTokenResponse, UpdateMemberRequest};

/// POST /api/socios - Register a member and issue their first QR token
pub async fn register_member(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterMemberCommand {
        actor: user,
        documento: req.documento,
        nombre: req.nombre,
        expires_on: req.fecha_vencimiento,
        plan: req.plan,
    };

    let result = state.register_member_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(result.member))))
}

/// GET /api/socios/:id - Member with derived standing
pub async fn get_member(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: MemberId = parse_id(&member_id, "socio_id")?;

    let view = state
        .get_member_handler()
        .handle(GetMemberQuery {
            actor: user,
            member_id,
        })
        .await?;

    Ok(Json(MemberResponse::from(view)))
}

/// PUT /api/socios/:id - Admin edit of estado, fecha_vencimiento, plan
pub async fn update_member(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(member_id): Path<String>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: MemberId = parse_id(&member_id, "socio_id")?;

    let member = state
        .update_member_handler()
        .handle(UpdateMemberCommand {
            actor: user,
            member_id,
            changes: req.into(),
        })
        .await?;

    Ok(Json(MemberResponse::from(member)))
}

/// GET /api/socios/:id/qr.png - PNG of the live access token
pub async fn member_qr(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: MemberId = parse_id(&member_id, "socio_id")?;

    let png = state
        .render_qr_handler()
        .handle(RenderQrQuery {
            actor: user,
            member_id,
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    ))
}

/// POST /api/socios/:id/qr/rotate - Replace the live token
pub async fn rotate_member_token(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: MemberId = parse_id(&member_id, "socio_id")?;

    let token = state
        .rotate_token_handler()
        .handle(RotateTokenCommand {
            actor: user,
            member_id,
        })
        .await?;

    Ok(Json(RotateTokenResponse::from(token)))
}
