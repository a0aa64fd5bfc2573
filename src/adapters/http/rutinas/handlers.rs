//! HTTP handlers for routine endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::routine::{
    CreateRoutineCommand, GetRoutineQuery, ReviewExerciseCommand,
};
use crate::domain::foundation::{ExerciseId, RoutineId};

use super::dto::{CreateRoutineRequest, ExerciseResponse, ReviewExerciseRequest, RoutineResponse};

/// POST /api/rutinas - Create a routine, every exercise pending review
pub async fn create_routine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateRoutineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateRoutineCommand {
        actor: user,
        member_id: req.socio_id,
        name: req.nombre,
        exercises: req.ejercicios.into_iter().map(Into::into).collect(),
    };

    let routine = state.create_routine_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(RoutineResponse::from(routine))))
}

/// GET /api/rutinas/:id
pub async fn get_routine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(routine_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let routine_id: RoutineId = parse_id(&routine_id, "rutina_id")?;

    let routine = state
        .get_routine_handler()
        .handle(GetRoutineQuery {
            actor: user,
            routine_id,
        })
        .await?;

    Ok(Json(RoutineResponse::from(routine)))
}

/// PUT /api/rutinas/ejercicios/:id/revision - Instructor verdict on one exercise
pub async fn review_exercise(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(exercise_id): Path<String>,
    Json(req): Json<ReviewExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let exercise_id: ExerciseId = parse_id(&exercise_id, "ejercicio_id")?;

    let exercise = state
        .review_exercise_handler()
        .handle(ReviewExerciseCommand {
            actor: user,
            exercise_id,
            verdict: req.estado,
            notes: req.notas,
        })
        .await?;

    Ok(Json(ExerciseResponse::from(exercise)))
}
