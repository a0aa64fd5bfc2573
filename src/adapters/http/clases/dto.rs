//! Request and response bodies for `/api/clases`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::adapters::http::reservas::ReservationResponse;
use crate::application::handlers::scheduling::CancelClassResult;
use crate::domain::foundation::{ClassId, InstructorId, ReservationId, Timestamp};
use crate::domain::scheduling::{ClassSchedule, ClassStatus, ClassRoster, GymClass, Occupancy};
use crate::ports::ClassSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub nombre: String,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub cupo: u32,
    #[serde(default)]
    pub instructor_id: Option<InstructorId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClassesParams {
    #[serde(default)]
    pub fecha: Option<NaiveDate>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A class with occupancy derived from its active reservations.
#[derive(Debug, Clone, Serialize)]
pub struct ClassResponse {
    pub id: ClassId,
    pub nombre: String,
    #[serde(flatten)]
    pub horario: ClassSchedule,
    pub cupo: u32,
    pub ocupados: u32,
    pub disponibles: u32,
    pub estado: ClassStatus,
    pub instructor_id: Option<InstructorId>,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<Timestamp>,
}

impl ClassResponse {
    fn build(class: GymClass, occupancy: Occupancy) -> Self {
        Self {
            id: class.id,
            nombre: class.name,
            horario: class.schedule,
            cupo: occupancy.capacity,
            ocupados: occupancy.occupied,
            disponibles: occupancy.available(),
            estado: class.status,
            instructor_id: class.instructor_id,
            created_at: class.created_at,
            cancelled_at: class.cancelled_at,
        }
    }
}

impl From<ClassSummary> for ClassResponse {
    fn from(summary: ClassSummary) -> Self {
        Self::build(summary.class, summary.occupancy)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassRosterResponse {
    pub clase: ClassResponse,
    pub reservas: Vec<ReservationResponse>,
}

impl From<ClassRoster> for ClassRosterResponse {
    fn from(roster: ClassRoster) -> Self {
        let occupancy = roster.occupancy();
        Self {
            clase: ClassResponse::build(roster.class().clone(), occupancy),
            reservas: roster
                .reservations()
                .iter()
                .cloned()
                .map(ReservationResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelClassResponse {
    pub id: ClassId,
    pub estado: ClassStatus,
    /// Reservations moved to `cancelado` by this call.
    pub reservas_canceladas: Vec<ReservationId>,
}

impl From<CancelClassResult> for CancelClassResponse {
    fn from(result: CancelClassResult) -> Self {
        Self {
            id: result.class.id,
            estado: result.class.status,
            reservas_canceladas: result.cancelled_reservations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_response_flattens_schedule_and_derives_availability() {
        let schedule = ClassSchedule::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        )
        .unwrap();
        let class = GymClass::create("Spinning", schedule, 10, None).unwrap();

        let json = serde_json::to_value(ClassResponse::build(
            class,
            Occupancy {
                capacity: 10,
                occupied: 7,
            },
        ))
        .unwrap();

        assert_eq!(json["fecha"], "2025-06-02");
        assert_eq!(json["hora_inicio"], "18:00:00");
        assert_eq!(json["ocupados"], 7);
        assert_eq!(json["disponibles"], 3);
        assert_eq!(json["estado"], "activa");
        assert!(json.get("cancelled_at").is_none());
    }
}
