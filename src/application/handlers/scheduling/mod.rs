//! Scheduling handlers: classes, reservations, attendance.
//!
//! Every write goes through a `RosterLease`, so all rules for one class
//! are checked and applied while no other request can touch that class.
//!
//! ## Commands
//! - Create a class / cancel a class (cascades to its reservations)
//! - Create a reservation / cancel a reservation
//! - Mark attendance
//!
//! ## Queries
//! - Get or list classes with derived occupancy
//! - Class roster
//! - A member's reservations

mod cancel_class;
mod cancel_reservation;
mod create_class;
mod create_reservation;
mod get_class;
mod list_member_reservations;
mod mark_attendance;

#[cfg(test)]
mod test_support;

// Commands
pub use cancel_class::{CancelClassCommand, CancelClassHandler, CancelClassResult};
pub use cancel_reservation::{CancelReservationCommand, CancelReservationHandler};
pub use create_class::{CreateClassCommand, CreateClassHandler};
pub use create_reservation::{
    CreateReservationCommand, CreateReservationHandler, ReservationCreated,
};
pub use mark_attendance::{MarkAttendanceCommand, MarkAttendanceHandler};

// Queries
pub use get_class::{ClassQueryHandler, GetClassQuery, GetClassRosterQuery, ListClassesQuery};
pub use list_member_reservations::{ListMemberReservationsHandler, ListMemberReservationsQuery};
