//! Request and response bodies for `/api/rutinas`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExerciseId, MemberId, RoutineId, Timestamp, UserId};
use crate::domain::routine::{NewExercise, ReviewStatus, ReviewVerdict, Routine, RoutineExercise};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct NewExerciseRequest {
    pub nombre: String,
    #[serde(default)]
    pub series: Option<u32>,
    #[serde(default)]
    pub repeticiones: Option<u32>,
}

impl From<NewExerciseRequest> for NewExercise {
    fn from(req: NewExerciseRequest) -> Self {
        NewExercise {
            name: req.nombre,
            sets: req.series,
            reps: req.repeticiones,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoutineRequest {
    pub socio_id: MemberId,
    pub nombre: String,
    pub ejercicios: Vec<NewExerciseRequest>,
}

/// `estado` is `aprobado` or `rechazado`; a review never returns an
/// exercise to `pendiente`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewExerciseRequest {
    pub estado: ReviewVerdict,
    #[serde(default)]
    pub notas: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseResponse {
    pub id: ExerciseId,
    pub nombre: String,
    pub series: Option<u32>,
    pub repeticiones: Option<u32>,
    pub estado: ReviewStatus,
    pub notas_instructor: Option<String>,
    pub revisado_por: Option<UserId>,
    pub revisado_at: Option<Timestamp>,
}

impl From<RoutineExercise> for ExerciseResponse {
    fn from(e: RoutineExercise) -> Self {
        Self {
            id: e.id,
            nombre: e.name,
            series: e.sets,
            repeticiones: e.reps,
            estado: e.review.status,
            notas_instructor: e.review.notes,
            revisado_por: e.review.reviewed_by,
            revisado_at: e.review.reviewed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutineResponse {
    pub id: RoutineId,
    pub socio_id: MemberId,
    pub nombre: String,
    pub creado_por: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub ejercicios: Vec<ExerciseResponse>,
}

impl From<Routine> for RoutineResponse {
    fn from(r: Routine) -> Self {
        Self {
            id: r.id,
            socio_id: r.member_id,
            nombre: r.name,
            creado_por: r.created_by,
            created_at: r.created_at,
            updated_at: r.updated_at,
            ejercicios: r.exercises.into_iter().map(Into::into).collect(),
        }
    }
}
