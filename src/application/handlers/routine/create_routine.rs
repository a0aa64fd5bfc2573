//! CreateRoutineHandler - Command handler for assigning a routine to a member.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MemberId};
use crate::domain::routine::{NewExercise, Routine, RoutineError};
use crate::ports::{MemberRepository, RoutineRepository};

#[derive(Debug, Clone)]
pub struct CreateRoutineCommand {
    pub actor: AuthenticatedUser,
    pub member_id: MemberId,
    pub name: String,
    pub exercises: Vec<NewExercise>,
}

pub struct CreateRoutineHandler {
    members: Arc<dyn MemberRepository>,
    routines: Arc<dyn RoutineRepository>,
}

impl CreateRoutineHandler {
    pub fn new(members: Arc<dyn MemberRepository>, routines: Arc<dyn RoutineRepository>) -> Self {
        Self { members, routines }
    }

    pub async fn handle(&self, cmd: CreateRoutineCommand) -> Result<Routine, RoutineError> {
        if !cmd.actor.role.can_author_routines() {
            return Err(RoutineError::Forbidden);
        }

        if self.members.find_by_id(&cmd.member_id).await?.is_none() {
            return Err(RoutineError::MemberNotFound(cmd.member_id));
        }

        let routine = Routine::create(cmd.member_id, cmd.name, cmd.exercises, cmd.actor.user_id)?;
        self.routines.save(&routine).await?;

        tracing::info!(
            routine_id = %routine.id,
            member_id = %routine.member_id,
            exercises = routine.exercises.len(),
            "routine created"
        );

        Ok(routine)
    }
}
