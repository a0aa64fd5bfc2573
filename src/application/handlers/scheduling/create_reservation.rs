//! CreateReservationHandler - Command handler for booking a class seat.
//!
//! The member's standing is evaluated before the lease is taken; the
//! cancelled-class, duplicate and capacity checks run on the leased roster,
//! so they and the insert form one unit against concurrent bookings.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ClassId, GymClock, MemberId};
use crate::domain::membership::MembershipStatusEvaluator;
use crate::domain::scheduling::{
    BookingOrigin, BookingRequest, Occupancy, Reservation, SchedulingError,
};
use crate::ports::{MemberRepository, RosterRepository};

#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub actor: AuthenticatedUser,
    pub class_id: ClassId,
    /// Member to book. Defaults to the caller's own member record.
    pub member_id: Option<MemberId>,
}

#[derive(Debug, Clone)]
pub struct ReservationCreated {
    pub reservation: Reservation,
    /// Occupancy including the new seat.
    pub occupancy: Occupancy,
}

pub struct CreateReservationHandler {
    members: Arc<dyn MemberRepository>,
    rosters: Arc<dyn RosterRepository>,
    clock: GymClock,
}

impl CreateReservationHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        rosters: Arc<dyn RosterRepository>,
        clock: GymClock,
    ) -> Self {
        Self {
            members,
            rosters,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateReservationCommand,
    ) -> Result<ReservationCreated, SchedulingError> {
        let member_id = match cmd.member_id.or(cmd.actor.member_id) {
            Some(id) => id,
            None => return Err(SchedulingError::validation("socio_id", "is required")),
        };

        if !cmd.actor.can_act_for(&member_id) {
            return Err(SchedulingError::Forbidden);
        }

        let origin = if cmd.actor.role.is_staff() {
            BookingOrigin::Staff
        } else {
            BookingOrigin::Socio
        };

        let member = self
            .members
            .find_by_id(&member_id)
            .await?
            .ok_or(SchedulingError::MemberNotFound(member_id))?;
        let standing = MembershipStatusEvaluator::evaluate(&member, self.clock.today());

        let mut lease = self
            .rosters
            .lock(&cmd.class_id)
            .await?
            .ok_or(SchedulingError::ClassNotFound(cmd.class_id))?;

        let reservation = match lease.roster_mut().book(BookingRequest {
            member_id,
            standing,
            origin,
        }) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    class_id = %cmd.class_id,
                    member_id = %member_id,
                    code = %e.code(),
                    "booking rejected"
                );
                return Err(e);
            }
        };
        let occupancy = lease.roster().occupancy();

        lease.commit().await?;

        tracing::info!(
            reservation_id = %reservation.id,
            class_id = %cmd.class_id,
            member_id = %member_id,
            origin = reservation.origin.as_str(),
            ocupados = occupancy.occupied,
            "reservation created"
        );

        Ok(ReservationCreated {
            reservation,
            occupancy,
        })
    }
}
