//! Reservation (reserva) entity and its status machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ClassId, MemberId, ReservationId, StateMachine, Timestamp, ValidationError,
};

use super::SchedulingError;

/// Reservation status.
///
/// ```text
/// reservado ──┬──> cancelado
///             ├──> asistio
///             └──> ausente
/// ```
///
/// Every state other than `reservado` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "reservado")]
    Reserved,
    #[serde(rename = "cancelado")]
    Cancelled,
    #[serde(rename = "asistio")]
    Attended,
    #[serde(rename = "ausente")]
    Absent,
}

impl ReservationStatus {
    /// States that hold a seat and count towards occupancy.
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Reserved | ReservationStatus::Attended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Reserved => "reservado",
            ReservationStatus::Cancelled => "cancelado",
            ReservationStatus::Attended => "asistio",
            ReservationStatus::Absent => "ausente",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reservado" => Ok(ReservationStatus::Reserved),
            "cancelado" => Ok(ReservationStatus::Cancelled),
            "asistio" => Ok(ReservationStatus::Attended),
            "ausente" => Ok(ReservationStatus::Absent),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("unknown reservation status '{}'", other),
            )),
        }
    }
}

impl StateMachine for ReservationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, target),
            (Reserved, Cancelled) | (Reserved, Attended) | (Reserved, Absent)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReservationStatus::*;
        match self {
            Reserved => vec![Cancelled, Attended, Absent],
            Cancelled | Attended | Absent => vec![],
        }
    }
}

/// Attendance outcome recorded by staff after the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceMark {
    #[serde(rename = "asistio")]
    Attended,
    #[serde(rename = "ausente")]
    Absent,
}

impl From<AttendanceMark> for ReservationStatus {
    fn from(mark: AttendanceMark) -> Self {
        match mark {
            AttendanceMark::Attended => ReservationStatus::Attended,
            AttendanceMark::Absent => ReservationStatus::Absent,
        }
    }
}

impl FromStr for AttendanceMark {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asistio" => Ok(AttendanceMark::Attended),
            "ausente" => Ok(AttendanceMark::Absent),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("attendance must be 'asistio' or 'ausente', got '{}'", other),
            )),
        }
    }
}

/// Who created the reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingOrigin {
    /// The member booked for themselves.
    Socio,
    /// Front desk or an administrator booked on the member's behalf.
    Staff,
}

impl BookingOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingOrigin::Socio => "socio",
            BookingOrigin::Staff => "staff",
        }
    }
}

impl FromStr for BookingOrigin {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "socio" => Ok(BookingOrigin::Socio),
            "staff" => Ok(BookingOrigin::Staff),
            other => Err(ValidationError::invalid_format(
                "origen",
                format!("unknown booking origin '{}'", other),
            )),
        }
    }
}

/// A member's seat in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub status: ReservationStatus,
    pub origin: BookingOrigin,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reservation {
    pub(crate) fn new(class_id: ClassId, member_id: MemberId, origin: BookingOrigin) -> Self {
        let now = Timestamp::now();
        Self {
            id: ReservationId::new(),
            class_id,
            member_id,
            status: ReservationStatus::Reserved,
            origin,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Cancels the reservation. Returns false if it was already cancelled.
    pub(crate) fn cancel(&mut self) -> Result<bool, SchedulingError> {
        if self.status == ReservationStatus::Cancelled {
            return Ok(false);
        }
        self.transition(ReservationStatus::Cancelled, "cancel")?;
        Ok(true)
    }

    pub(crate) fn mark_attendance(&mut self, mark: AttendanceMark) -> Result<(), SchedulingError> {
        self.transition(mark.into(), "mark attendance on")
    }

    fn transition(&mut self, target: ReservationStatus, action: &str) -> Result<(), SchedulingError> {
        let current = self.status;
        self.status = current
            .transition_to(target)
            .map_err(|_| SchedulingError::invalid_state(current, action))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
