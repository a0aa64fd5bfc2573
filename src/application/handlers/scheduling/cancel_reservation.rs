//! CancelReservationHandler - Command handler for giving a seat back.
//!
//! Repeating a cancellation succeeds without writing anything.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ReservationId};
use crate::domain::scheduling::{Reservation, SchedulingError};
use crate::ports::RosterRepository;

#[derive(Debug, Clone)]
pub struct CancelReservationCommand {
    pub actor: AuthenticatedUser,
    pub reservation_id: ReservationId,
}

pub struct CancelReservationHandler {
    rosters: Arc<dyn RosterRepository>,
}

impl CancelReservationHandler {
    pub fn new(rosters: Arc<dyn RosterRepository>) -> Self {
        Self { rosters }
    }

    pub async fn handle(&self, cmd: CancelReservationCommand) -> Result<Reservation, SchedulingError> {
        let existing = self
            .rosters
            .find_reservation(&cmd.reservation_id)
            .await?
            .ok_or(SchedulingError::ReservationNotFound(cmd.reservation_id))?;

        if !cmd.actor.can_act_for(&existing.member_id) {
            return Err(SchedulingError::Forbidden);
        }

        let mut lease = self
            .rosters
            .lock(&existing.class_id)
            .await?
            .ok_or(SchedulingError::ClassNotFound(existing.class_id))?;

        let outcome = lease.roster_mut().cancel_reservation(&cmd.reservation_id)?;

        if outcome.changed {
            lease.commit().await?;
            tracing::info!(
                reservation_id = %cmd.reservation_id,
                class_id = %existing.class_id,
                actor = %cmd.actor.user_id,
                "reservation cancelled"
            );
        } else {
            tracing::debug!(reservation_id = %cmd.reservation_id, "reservation already cancelled");
        }

        Ok(outcome.reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::scheduling::test_support::{socio, staff, Fixture};
    use crate::application::handlers::scheduling::{
        CreateReservationCommand, CreateReservationHandler,
    };
    use crate::domain::foundation::{MemberId, Role};
    use crate::domain::scheduling::{AttendanceMark, ReservationStatus};

    async fn booked(f: &Fixture) -> (MemberId, Reservation) {
        let member = f.member("200").await;
        let class = f.class(3).await;
        let created = CreateReservationHandler::new(f.members.clone(), f.rosters.clone(), f.clock)
            .handle(CreateReservationCommand {
                actor: socio(member.id),
                class_id: class.id,
                member_id: None,
            })
            .await
            .unwrap();
        (member.id, created.reservation)
    }

    #[tokio::test]
    async fn cancel_twice_succeeds_both_times() {
        let f = Fixture::new();
        let (member_id, reservation) = booked(&f).await;
        let handler = CancelReservationHandler::new(f.rosters.clone());
        let cmd = CancelReservationCommand {
            actor: socio(member_id),
            reservation_id: reservation.id,
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert_eq!(first.status, ReservationStatus::Cancelled);
        assert_eq!(second, first);
        let summary = f.rosters.find_class(&reservation.class_id).await.unwrap().unwrap();
        assert_eq!(summary.occupancy.occupied, 0);
    }

    #[tokio::test]
    async fn other_members_cannot_cancel() {
        let f = Fixture::new();
        let (_, reservation) = booked(&f).await;
        let handler = CancelReservationHandler::new(f.rosters.clone());

        let err = handler
            .handle(CancelReservationCommand {
                actor: socio(MemberId::new()),
                reservation_id: reservation.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::Forbidden);
    }

    #[tokio::test]
    async fn attended_reservation_cannot_be_cancelled() {
        let f = Fixture::new();
        let (_, reservation) = booked(&f).await;
        let mut lease = f.rosters.lock(&reservation.class_id).await.unwrap().unwrap();
        lease
            .roster_mut()
            .mark_attendance(&reservation.id, AttendanceMark::Attended)
            .unwrap();
        lease.commit().await.unwrap();

        let err = CancelReservationHandler::new(f.rosters.clone())
            .handle(CancelReservationCommand {
                actor: staff(Role::Recepcion),
                reservation_id: reservation.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidStateTransition { .. }));
    }

    #[tokio::test]
    async fn unknown_reservation_is_not_found() {
        let f = Fixture::new();
        let missing = ReservationId::new();
        let err = CancelReservationHandler::new(f.rosters.clone())
            .handle(CancelReservationCommand {
                actor: staff(Role::Admin),
                reservation_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::ReservationNotFound(missing));
    }
}
