//! GetRoutineHandler - Query handler for a routine and its review state.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, RoutineId};
use crate::domain::routine::{Routine, RoutineError};
use crate::ports::RoutineRepository;

#[derive(Debug, Clone)]
pub struct GetRoutineQuery {
    pub actor: AuthenticatedUser,
    pub routine_id: RoutineId,
}

pub struct GetRoutineHandler {
    routines: Arc<dyn RoutineRepository>,
}

impl GetRoutineHandler {
    pub fn new(routines: Arc<dyn RoutineRepository>) -> Self {
        Self { routines }
    }

    pub async fn handle(&self, query: GetRoutineQuery) -> Result<Routine, RoutineError> {
        let routine = self
            .routines
            .find_by_id(&query.routine_id)
            .await?
            .ok_or(RoutineError::NotFound(query.routine_id))?;

        // Owner, front desk, or whoever reviews exercises.
        if !query.actor.can_act_for(&routine.member_id) && !query.actor.role.can_author_routines() {
            return Err(RoutineError::Forbidden);
        }

        Ok(routine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::routine::test_support::{actor, Fixture};
    use crate::domain::foundation::{MemberId, Role};

    #[tokio::test]
    async fn owner_reads_routine_and_others_cannot() {
        let f = Fixture::new();
        let routine = f.routine().await;
        let handler = GetRoutineHandler::new(f.routines.clone());

        let owner = actor(Role::Socio).with_member(routine.member_id);
        assert!(handler
            .handle(GetRoutineQuery {
                actor: owner,
                routine_id: routine.id,
            })
            .await
            .is_ok());

        let stranger = actor(Role::Socio).with_member(MemberId::new());
        let err = handler
            .handle(GetRoutineQuery {
                actor: stranger,
                routine_id: routine.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, RoutineError::Forbidden);
    }

    #[tokio::test]
    async fn missing_routine_is_not_found() {
        let f = Fixture::new();
        let missing = RoutineId::new();
        let err = GetRoutineHandler::new(f.routines.clone())
            .handle(GetRoutineQuery {
                actor: actor(Role::Instructor),
                routine_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, RoutineError::NotFound(missing));
    }
}
