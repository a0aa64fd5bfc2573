//! CancelClassHandler - Command handler for the class lifecycle.
//!
//! Cancelling a class cascades to every reservation still in `reservado`.
//! The class row and all cascaded reservations are written in one lease
//! commit, so no caller ever observes a partial cascade.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ClassId, ReservationId};
use crate::domain::scheduling::{GymClass, SchedulingError};
use crate::ports::RosterRepository;

#[derive(Debug, Clone)]
pub struct CancelClassCommand {
    pub actor: AuthenticatedUser,
    pub class_id: ClassId,
}

#[derive(Debug, Clone)]
pub struct CancelClassResult {
    pub class: GymClass,
    /// Reservations this call moved to `cancelado`.
    pub cancelled_reservations: Vec<ReservationId>,
    /// False when the class was already cancelled.
    pub changed: bool,
}

pub struct CancelClassHandler {
    rosters: Arc<dyn RosterRepository>,
}

impl CancelClassHandler {
    pub fn new(rosters: Arc<dyn RosterRepository>) -> Self {
        Self { rosters }
    }

    pub async fn handle(&self, cmd: CancelClassCommand) -> Result<CancelClassResult, SchedulingError> {
        if !cmd.actor.role.can_manage_classes() {
            return Err(SchedulingError::Forbidden);
        }

        let mut lease = self
            .rosters
            .lock(&cmd.class_id)
            .await?
            .ok_or(SchedulingError::ClassNotFound(cmd.class_id))?;

        let cancellation = lease.roster_mut().cancel_class()?;
        let class = lease.roster().class().clone();

        if cancellation.changed {
            lease.commit().await?;
            tracing::info!(
                class_id = %cmd.class_id,
                cascaded = cancellation.cancelled_reservations.len(),
                actor = %cmd.actor.user_id,
                "class cancelled"
            );
        }

        Ok(CancelClassResult {
            class,
            cancelled_reservations: cancellation.cancelled_reservations,
            changed: cancellation.changed,
        })
    }
}
