//! Class roster aggregate.
//!
//! A roster is one class together with every reservation made for it. All
//! booking, cancellation, attendance, and class-cancellation rules are
//! evaluated here, against a roster the caller holds exclusively, so that
//! the checks and the write they guard cannot interleave with another
//! request for the same class.

use crate::domain::foundation::{ClassId, MemberId, ReservationId};
use crate::domain::membership::MembershipStanding;

use super::{
    AttendanceMark, BookingOrigin, CapacityTracker, GymClass, Occupancy, Reservation,
    ReservationStatus, SchedulingError,
};

/// A class and all of its reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRoster {
    class: GymClass,
    reservations: Vec<Reservation>,
}

/// Everything the roster needs to know about the member being booked.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest {
    pub member_id: MemberId,
    pub standing: MembershipStanding,
    pub origin: BookingOrigin,
}

/// Outcome of a reservation cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelledReservation {
    pub reservation: Reservation,
    /// False when the reservation was already cancelled.
    pub changed: bool,
}

/// Outcome of a class cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCancellation {
    /// False when the class was already cancelled.
    pub changed: bool,
    /// Reservations moved from `reservado` to `cancelado` by this call.
    pub cancelled_reservations: Vec<ReservationId>,
}

impl ClassRoster {
    /// Reconstitutes a roster from storage.
    pub fn new(class: GymClass, reservations: Vec<Reservation>) -> Self {
        Self {
            class,
            reservations,
        }
    }

    pub fn class(&self) -> &GymClass {
        &self.class
    }

    pub fn class_id(&self) -> ClassId {
        self.class.id
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| &r.id == id)
    }

    /// Derived occupancy: reservations in `reservado` or `asistio`.
    pub fn occupancy(&self) -> Occupancy {
        let occupied = self.reservations.iter().filter(|r| r.is_active()).count();
        Occupancy {
            capacity: self.class.capacity,
            occupied: u32::try_from(occupied).unwrap_or(u32::MAX),
        }
    }

    pub fn active_reservation_for(&self, member_id: &MemberId) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| &r.member_id == member_id && r.is_active())
    }

    /// Books a seat.
    ///
    /// Checks run in a fixed order and the first failure wins: class
    /// cancelled, member not in good standing (self-service only),
    /// duplicate, capacity.
    pub fn book(&mut self, request: BookingRequest) -> Result<Reservation, SchedulingError> {
        if !self.class.is_active() {
            return Err(SchedulingError::ClassCancelled(self.class.id));
        }

        if request.origin == BookingOrigin::Socio && !request.standing.is_active() {
            return Err(SchedulingError::MemberInactive(request.member_id));
        }

        if self.active_reservation_for(&request.member_id).is_some() {
            return Err(SchedulingError::DuplicateReservation {
                class_id: self.class.id,
                member_id: request.member_id,
            });
        }

        CapacityTracker::try_reserve(self)?;

        let reservation = Reservation::new(self.class.id, request.member_id, request.origin);
        self.reservations.push(reservation.clone());
        Ok(reservation)
    }

    /// Cancels one reservation. Repeating the call is a successful no-op.
    pub fn cancel_reservation(
        &mut self,
        reservation_id: &ReservationId,
    ) -> Result<CancelledReservation, SchedulingError> {
        let reservation = self.reservation_mut(reservation_id)?;
        let changed = reservation.cancel()?;
        Ok(CancelledReservation {
            reservation: reservation.clone(),
            changed,
        })
    }

    /// Records attendance for a reservation still in `reservado`.
    pub fn mark_attendance(
        &mut self,
        reservation_id: &ReservationId,
        mark: AttendanceMark,
    ) -> Result<Reservation, SchedulingError> {
        let reservation = self.reservation_mut(reservation_id)?;
        reservation.mark_attendance(mark)?;
        Ok(reservation.clone())
    }

    /// Cancels the class and every reservation still in `reservado`.
    ///
    /// Attendance already recorded is left untouched. Cancelling a class
    /// that is already cancelled changes nothing.
    pub fn cancel_class(&mut self) -> Result<ClassCancellation, SchedulingError> {
        if !self.class.mark_cancelled() {
            return Ok(ClassCancellation {
                changed: false,
                cancelled_reservations: Vec::new(),
            });
        }

        let mut cancelled = Vec::new();
        for reservation in self
            .reservations
            .iter_mut()
            .filter(|r| r.status == ReservationStatus::Reserved)
        {
            reservation.cancel()?;
            cancelled.push(reservation.id);
        }

        Ok(ClassCancellation {
            changed: true,
            cancelled_reservations: cancelled,
        })
    }

    fn reservation_mut(
        &mut self,
        reservation_id: &ReservationId,
    ) -> Result<&mut Reservation, SchedulingError> {
        self.reservations
            .iter_mut()
            .find(|r| &r.id == reservation_id)
            .ok_or(SchedulingError::ReservationNotFound(*reservation_id))
    }
}
