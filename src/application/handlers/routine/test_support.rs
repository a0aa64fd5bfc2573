//! Shared fixture for routine handler tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::memory::{InMemoryMemberRepository, InMemoryRoutineRepository};
use crate::domain::foundation::{AuthenticatedUser, MemberId, Role, UserId};
use crate::domain::membership::Member;
use crate::domain::routine::{NewExercise, Routine};
use crate::ports::{MemberRepository, RoutineRepository};

use super::CreateRoutineCommand;

pub(super) fn actor(role: Role) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(format!("{}-9", role)).unwrap(), role)
}

pub(super) struct Fixture {
    pub members: Arc<InMemoryMemberRepository>,
    pub routines: Arc<InMemoryRoutineRepository>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            members: Arc::new(InMemoryMemberRepository::new()),
            routines: Arc::new(InMemoryRoutineRepository::new()),
        }
    }

    pub async fn member(&self) -> Member {
        let member = Member::register(
            "28999000",
            "Lucía Gómez",
            NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            None,
        )
        .unwrap();
        self.members.save(&member).await.unwrap();
        member
    }

    pub fn command(&self, actor: AuthenticatedUser, member_id: MemberId) -> CreateRoutineCommand {
        CreateRoutineCommand {
            actor,
            member_id,
            name: "Fuerza A".to_string(),
            exercises: vec![
                NewExercise {
                    name: "Press banca".to_string(),
                    sets: Some(4),
                    reps: Some(8),
                },
                NewExercise {
                    name: "Plancha".to_string(),
                    sets: Some(3),
                    reps: None,
                },
            ],
        }
    }

    pub async fn routine(&self) -> Routine {
        let member = self.member().await;
        let routine = Routine::create(
            member.id,
            "Fuerza A",
            self.command(actor(Role::Instructor), member.id).exercises,
            UserId::new("instructor-9").unwrap(),
        )
        .unwrap();
        self.routines.save(&routine).await.unwrap();
        routine
    }
}
