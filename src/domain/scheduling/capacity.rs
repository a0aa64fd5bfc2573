//! Seat accounting for a class.
//!
//! Occupancy is recomputed from the reservation set on every read. There is
//! no stored counter to increment or release; a reservation leaving an
//! active state frees its seat by no longer being counted.

use serde::Serialize;

use super::{ClassRoster, SchedulingError};

/// Seats taken versus seats offered, as of the moment it was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    #[serde(rename = "cupo")]
    pub capacity: u32,
    #[serde(rename = "ocupados")]
    pub occupied: u32,
}

impl Occupancy {
    /// Seats still open. Never negative, even for legacy over-booked data.
    pub fn available(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }

    pub fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }
}

/// Check-and-claim primitive over a class roster.
///
/// Atomicity comes from the caller holding the roster under its exclusive
/// per-class lease: the count observed here cannot change before the new
/// reservation is written in the same lease.
pub struct CapacityTracker;

impl CapacityTracker {
    /// Succeeds when at least one seat is open right now.
    pub fn try_reserve(roster: &ClassRoster) -> Result<Occupancy, SchedulingError> {
        let occupancy = roster.occupancy();
        if occupancy.is_full() {
            return Err(SchedulingError::CapacityFull {
                class_id: roster.class().id,
                capacity: occupancy.capacity,
            });
        }
        Ok(occupancy)
    }
}
