//! Scheduling domain module: classes, reservations, and seat accounting.
//!
//! # Module Structure
//!
//! - `class` - GymClass, ClassSchedule, ClassStatus lifecycle
//! - `reservation` - Reservation and its status machine
//! - `capacity` - Derived occupancy and CapacityTracker
//! - `roster` - ClassRoster aggregate (booking, cancellation, cascade)
//! - `errors` - SchedulingError

mod capacity;
mod class;
mod errors;
mod reservation;
mod roster;

pub use capacity::{CapacityTracker, Occupancy};
pub use class::{ClassSchedule, ClassStatus, GymClass, MAX_CAPACITY};
pub use errors::SchedulingError;
pub use reservation::{AttendanceMark, BookingOrigin, Reservation, ReservationStatus};
pub use roster::{BookingRequest, CancelledReservation, ClassCancellation, ClassRoster};
