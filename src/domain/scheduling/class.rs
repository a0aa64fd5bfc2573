//! Scheduled class and its lifecycle.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ClassId, InstructorId, StateMachine, Timestamp, ValidationError,
};

use super::SchedulingError;

/// Largest seat count accepted for a single class.
pub const MAX_CAPACITY: u32 = 10_000;

/// Class lifecycle status.
///
/// `activa` is the initial state. Cancellation is the only transition and
/// it never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassStatus {
    #[serde(rename = "activa")]
    Active,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Active => "activa",
            ClassStatus::Cancelled => "cancelada",
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activa" => Ok(ClassStatus::Active),
            "cancelada" => Ok(ClassStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("unknown class status '{}'", other),
            )),
        }
    }
}

impl StateMachine for ClassStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (ClassStatus::Active, ClassStatus::Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ClassStatus::Active => vec![ClassStatus::Cancelled],
            ClassStatus::Cancelled => vec![],
        }
    }
}

/// When a class takes place, in gym local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora_inicio")]
    pub starts_at: NaiveTime,
    #[serde(rename = "hora_fin")]
    pub ends_at: NaiveTime,
}

impl ClassSchedule {
    pub fn new(date: NaiveDate, starts_at: NaiveTime, ends_at: NaiveTime) -> Result<Self, ValidationError> {
        if starts_at >= ends_at {
            return Err(ValidationError::invalid_format(
                "hora_fin",
                "must be later than hora_inicio",
            ));
        }
        Ok(Self {
            date,
            starts_at,
            ends_at,
        })
    }
}

/// A scheduled class with a fixed seat count (cupo).
///
/// Occupancy is not a field: it is always derived from the reservations
/// in the class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymClass {
    pub id: ClassId,
    pub name: String,
    pub schedule: ClassSchedule,
    pub capacity: u32,
    pub status: ClassStatus,
    pub instructor_id: Option<InstructorId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
}

impl GymClass {
    /// Creates a new active class.
    pub fn create(
        name: impl Into<String>,
        schedule: ClassSchedule,
        capacity: u32,
        instructor_id: Option<InstructorId>,
    ) -> Result<Self, SchedulingError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("nombre").into());
        }
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(ValidationError::out_of_range(
                "cupo",
                1,
                MAX_CAPACITY as i32,
                capacity.min(i32::MAX as u32) as i32,
            )
            .into());
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ClassId::new(),
            name,
            schedule,
            capacity,
            status: ClassStatus::Active,
            instructor_id,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == ClassStatus::Active
    }

    /// Moves the class to `cancelada`. Returns false if it already was.
    pub(crate) fn mark_cancelled(&mut self) -> bool {
        if self.status.transition_to(ClassStatus::Cancelled).is_err() {
            return false;
        }
        let now = Timestamp::now();
        self.status = ClassStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        true
    }
}
