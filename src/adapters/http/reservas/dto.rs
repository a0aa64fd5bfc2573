//! Request and response bodies for `/api/reservas`.

use serde::{Deserialize, Serialize};

use crate::application::handlers::scheduling::ReservationCreated;
use crate::domain::foundation::{ClassId, MemberId, ReservationId, Timestamp};
use crate::domain::scheduling::{
    AttendanceMark, BookingOrigin, Occupancy, Reservation, ReservationStatus,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Members omit `socio_id` to book for themselves; staff name the member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    pub clase_id: ClassId,
    #[serde(default)]
    pub socio_id: Option<MemberId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub estado: AttendanceMark,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReservationsParams {
    #[serde(default)]
    pub socio_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub clase_id: ClassId,
    pub socio_id: MemberId,
    pub estado: ReservationStatus,
    pub origen: BookingOrigin,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            clase_id: r.class_id,
            socio_id: r.member_id,
            estado: r.status,
            origen: r.origin,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// A new reservation plus the class occupancy it left behind.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationCreatedResponse {
    #[serde(flatten)]
    pub reserva: ReservationResponse,
    #[serde(flatten)]
    pub ocupacion: Occupancy,
    pub disponibles: u32,
}

impl From<ReservationCreated> for ReservationCreatedResponse {
    fn from(created: ReservationCreated) -> Self {
        Self {
            reserva: created.reservation.into(),
            disponibles: created.occupancy.available(),
            ocupacion: created.occupancy,
        }
    }
}
