//! ListMemberReservationsHandler - Query handler for a member's bookings.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MemberId};
use crate::domain::scheduling::{Reservation, SchedulingError};
use crate::ports::RosterRepository;

#[derive(Debug, Clone)]
pub struct ListMemberReservationsQuery {
    pub actor: AuthenticatedUser,
    /// Defaults to the caller's own member record.
    pub member_id: Option<MemberId>,
}

pub struct ListMemberReservationsHandler {
    rosters: Arc<dyn RosterRepository>,
}

impl ListMemberReservationsHandler {
    pub fn new(rosters: Arc<dyn RosterRepository>) -> Self {
        Self { rosters }
    }

    /// Newest first.
    pub async fn handle(
        &self,
        query: ListMemberReservationsQuery,
    ) -> Result<Vec<Reservation>, SchedulingError> {
        let member_id = query
            .member_id
            .or(query.actor.member_id)
            .ok_or_else(|| SchedulingError::validation("socio_id", "is required"))?;

        if !query.actor.can_act_for(&member_id) {
            return Err(SchedulingError::Forbidden);
        }

        Ok(self.rosters.list_reservations_for_member(&member_id).await?)
    }
}
