//! Shared fixture for scheduling handler tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::adapters::memory::{InMemoryMemberRepository, InMemoryRosterRepository};
use crate::domain::foundation::{AuthenticatedUser, GymClock, MemberId, Role, UserId};
use crate::domain::membership::{Member, MemberChanges, MemberStatus};
use crate::domain::scheduling::{ClassSchedule, GymClass};
use crate::ports::{MemberRepository, RosterRepository};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

pub(super) struct Fixture {
    pub members: Arc<InMemoryMemberRepository>,
    pub rosters: Arc<InMemoryRosterRepository>,
    pub clock: GymClock,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            members: Arc::new(InMemoryMemberRepository::new()),
            rosters: Arc::new(InMemoryRosterRepository::new()),
            clock: GymClock::pinned(today()),
        }
    }

    pub async fn member(&self, documento: &str) -> Member {
        let member = Member::register(documento, "Socio de prueba", today() + chrono::Days::new(30), None)
            .unwrap();
        self.members.save(&member).await.unwrap();
        member
    }

    pub async fn suspended_member(&self, documento: &str) -> Member {
        let mut member = self.member(documento).await;
        member.apply(MemberChanges {
            status: Some(MemberStatus::Suspended),
            ..Default::default()
        });
        self.members.update(&member).await.unwrap();
        member
    }

    pub async fn class(&self, capacity: u32) -> GymClass {
        let schedule = ClassSchedule::new(
            today(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        )
        .unwrap();
        let class = GymClass::create("Spinning", schedule, capacity, None).unwrap();
        self.rosters.create_class(&class).await.unwrap();
        class
    }
}

pub(super) fn socio(member_id: MemberId) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(format!("socio-{}", member_id)).unwrap(), Role::Socio)
        .with_member(member_id)
}

pub(super) fn staff(role: Role) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(format!("{}-1", role)).unwrap(), role)
}
