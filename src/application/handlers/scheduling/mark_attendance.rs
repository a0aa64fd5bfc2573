//! MarkAttendanceHandler - Command handler for recording attendance.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ReservationId};
use crate::domain::scheduling::{AttendanceMark, Reservation, SchedulingError};
use crate::ports::RosterRepository;

#[derive(Debug, Clone)]
pub struct MarkAttendanceCommand {
    pub actor: AuthenticatedUser,
    pub reservation_id: ReservationId,
    pub mark: AttendanceMark,
}

pub struct MarkAttendanceHandler {
    rosters: Arc<dyn RosterRepository>,
}

impl MarkAttendanceHandler {
    pub fn new(rosters: Arc<dyn RosterRepository>) -> Self {
        Self { rosters }
    }

    pub async fn handle(&self, cmd: MarkAttendanceCommand) -> Result<Reservation, SchedulingError> {
        if !cmd.actor.role.can_take_attendance() {
            return Err(SchedulingError::Forbidden);
        }

        let existing = self
            .rosters
            .find_reservation(&cmd.reservation_id)
            .await?
            .ok_or(SchedulingError::ReservationNotFound(cmd.reservation_id))?;

        let mut lease = self
            .rosters
            .lock(&existing.class_id)
            .await?
            .ok_or(SchedulingError::ClassNotFound(existing.class_id))?;

        let reservation = lease
            .roster_mut()
            .mark_attendance(&cmd.reservation_id, cmd.mark)?;
        lease.commit().await?;

        tracing::info!(
            reservation_id = %reservation.id,
            estado = reservation.status.as_str(),
            actor = %cmd.actor.user_id,
            "attendance recorded"
        );

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::scheduling::test_support::{socio, staff, Fixture};
    use crate::application::handlers::scheduling::{
        CreateReservationCommand, CreateReservationHandler,
    };
    use crate::domain::foundation::Role;
    use crate::domain::scheduling::ReservationStatus;

    async fn booked(f: &Fixture) -> Reservation {
        let member = f.member("300").await;
        let class = f.class(3).await;
        CreateReservationHandler::new(f.members.clone(), f.rosters.clone(), f.clock)
            .handle(CreateReservationCommand {
                actor: socio(member.id),
                class_id: class.id,
                member_id: None,
            })
            .await
            .unwrap()
            .reservation
    }

    #[tokio::test]
    async fn instructor_marks_absent() {
        let f = Fixture::new();
        let reservation = booked(&f).await;

        let marked = MarkAttendanceHandler::new(f.rosters.clone())
            .handle(MarkAttendanceCommand {
                actor: staff(Role::Instructor),
                reservation_id: reservation.id,
                mark: AttendanceMark::Absent,
            })
            .await
            .unwrap();

        assert_eq!(marked.status, ReservationStatus::Absent);
        let summary = f.rosters.find_class(&reservation.class_id).await.unwrap().unwrap();
        assert_eq!(summary.occupancy.occupied, 0);
    }

    #[tokio::test]
    async fn attendance_cannot_be_marked_twice() {
        let f = Fixture::new();
        let reservation = booked(&f).await;
        let handler = MarkAttendanceHandler::new(f.rosters.clone());
        let cmd = |mark| MarkAttendanceCommand {
            actor: staff(Role::Recepcion),
            reservation_id: reservation.id,
            mark,
        };

        handler.handle(cmd(AttendanceMark::Attended)).await.unwrap();
        let err = handler.handle(cmd(AttendanceMark::Absent)).await.unwrap_err();

        assert_eq!(
            err,
            SchedulingError::invalid_state(ReservationStatus::Attended, "mark attendance on")
        );
    }

    #[tokio::test]
    async fn members_cannot_mark_attendance() {
        let f = Fixture::new();
        let reservation = booked(&f).await;

        let err = MarkAttendanceHandler::new(f.rosters.clone())
            .handle(MarkAttendanceCommand {
                actor: socio(reservation.member_id),
                reservation_id: reservation.id,
                mark: AttendanceMark::Attended,
            })
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::Forbidden);
    }
}
