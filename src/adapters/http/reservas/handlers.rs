//! HTTP handlers for reservation endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::scheduling::{
    CancelReservationCommand, CreateReservationCommand, ListMemberReservationsQuery,
    MarkAttendanceCommand,
};
use crate::domain::foundation::{MemberId, ReservationId};

use super::dto::{
    CreateReservationRequest, ListReservationsParams, MarkAttendanceRequest,
    ReservationCreatedResponse, ReservationResponse,
};

/// POST /api/reservas - Book a seat
pub async fn create_reservation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateReservationCommand {
        actor: user,
        class_id: req.clase_id,
        member_id: req.socio_id,
    };

    let created = state.create_reservation_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationCreatedResponse::from(created)),
    ))
}

/// GET /api/reservas?socio_id= - A member's reservations, newest first
pub async fn list_reservations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListReservationsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id = params
        .socio_id
        .as_deref()
        .map(|raw| parse_id::<MemberId>(raw, "socio_id"))
        .transpose()?;

    let reservations = state
        .list_member_reservations_handler()
        .handle(ListMemberReservationsQuery {
            actor: user,
            member_id,
        })
        .await?;

    let body: Vec<ReservationResponse> = reservations.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// PUT /api/reservas/:id/cancelar - Cancel; repeating it is a no-op
pub async fn cancel_reservation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation_id: ReservationId = parse_id(&reservation_id, "reserva_id")?;

    let reservation = state
        .cancel_reservation_handler()
        .handle(CancelReservationCommand {
            actor: user,
            reservation_id,
        })
        .await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

/// PUT /api/reservas/:id/asistencia - Record attended or absent
pub async fn mark_attendance(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(reservation_id): Path<String>,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation_id: ReservationId = parse_id(&reservation_id, "reserva_id")?;

    let reservation = state
        .mark_attendance_handler()
        .handle(MarkAttendanceCommand {
            actor: user,
            reservation_id,
            mark: req.estado,
        })
        .await?;

    Ok(Json(ReservationResponse::from(reservation)))
}
