//! HTTP handlers for class endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::scheduling::{
    CancelClassCommand, CreateClassCommand, GetClassQuery, GetClassRosterQuery, ListClassesQuery,
};
use crate::domain::foundation::ClassId;

use super::dto::{
    CancelClassResponse, ClassResponse, ClassRosterResponse, CreateClassRequest, ListClassesParams,
};

/// POST /api/clases - Schedule a class
pub async fn create_class(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateClassCommand {
        actor: user,
        name: req.nombre,
        date: req.fecha,
        starts_at: req.hora_inicio,
        ends_at: req.hora_fin,
        capacity: req.cupo,
        instructor_id: req.instructor_id,
    };

    let summary = state.create_class_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ClassResponse::from(summary))))
}

/// GET /api/clases?fecha= - Classes, optionally for one day
pub async fn list_classes(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListClassesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let classes = state
        .class_query_handler()
        .list(ListClassesQuery { date: params.fecha })
        .await?;

    let body: Vec<ClassResponse> = classes.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// GET /api/clases/:id - One class with occupancy
pub async fn get_class(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let class_id: ClassId = parse_id(&class_id, "clase_id")?;

    let summary = state
        .class_query_handler()
        .get(GetClassQuery { class_id })
        .await?;

    Ok(Json(ClassResponse::from(summary)))
}

/// GET /api/clases/:id/reservas - Roster for attendance
pub async fn class_roster(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let class_id: ClassId = parse_id(&class_id, "clase_id")?;

    let roster = state
        .class_query_handler()
        .roster(GetClassRosterQuery {
            actor: user,
            class_id,
        })
        .await?;

    Ok(Json(ClassRosterResponse::from(roster)))
}

/// DELETE /api/clases/:id - Cancel the class and every live reservation in it
pub async fn cancel_class(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let class_id: ClassId = parse_id(&class_id, "clase_id")?;

    let result = state
        .cancel_class_handler()
        .handle(CancelClassCommand {
            actor: user,
            class_id,
        })
        .await?;

    Ok(Json(CancelClassResponse::from(result)))
}
