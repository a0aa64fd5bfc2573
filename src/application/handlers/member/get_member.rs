//! GetMemberHandler - Query handler for a member and their standing.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, GymClock, MemberId};
use crate::domain::membership::{Member, MemberError, MembershipStanding, MembershipStatusEvaluator};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub actor: AuthenticatedUser,
    pub member_id: MemberId,
}

#[derive(Debug, Clone)]
pub struct MemberView {
    pub member: Member,
    pub standing: MembershipStanding,
    /// Active membership that runs out within the configured warning window.
    pub expiring_soon: bool,
}

pub struct GetMemberHandler {
    members: Arc<dyn MemberRepository>,
    clock: GymClock,
    expiring_soon_days: u32,
}

impl GetMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: GymClock, expiring_soon_days: u32) -> Self {
        Self {
            members,
            clock,
            expiring_soon_days,
        }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<MemberView, MemberError> {
        if !query.actor.can_act_for(&query.member_id) {
            return Err(MemberError::Forbidden);
        }

        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or(MemberError::NotFound(query.member_id))?;

        let standing = MembershipStatusEvaluator::evaluate(&member, self.clock.today());

        Ok(MemberView {
            expiring_soon: standing.is_expiring_within(self.expiring_soon_days),
            member,
            standing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::membership::EffectiveStatus;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    async fn setup(expires_on: NaiveDate) -> (GetMemberHandler, Member) {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let member = Member::register("555", "Pablo", expires_on, None).unwrap();
        repo.save(&member).await.unwrap();
        (GetMemberHandler::new(repo, GymClock::pinned(today()), 7), member)
    }

    fn staff() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("desk").unwrap(), Role::Recepcion)
    }

    #[tokio::test]
    async fn returns_standing_and_expiry_warning() {
        let (handler, member) = setup(NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()).await;

        let view = handler
            .handle(GetMemberQuery {
                actor: staff(),
                member_id: member.id,
            })
            .await
            .unwrap();

        assert_eq!(view.standing.status, EffectiveStatus::Active);
        assert_eq!(view.standing.days_to_expiry, 3);
        assert!(view.expiring_soon);
    }

    #[tokio::test]
    async fn member_can_read_self_but_not_others() {
        let (handler, member) = setup(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()).await;
        let own = AuthenticatedUser::new(UserId::new("u").unwrap(), Role::Socio).with_member(member.id);
        let other = AuthenticatedUser::new(UserId::new("v").unwrap(), Role::Socio).with_member(MemberId::new());

        assert!(handler
            .handle(GetMemberQuery {
                actor: own,
                member_id: member.id
            })
            .await
            .is_ok());
        assert_eq!(
            handler
                .handle(GetMemberQuery {
                    actor: other,
                    member_id: member.id
                })
                .await
                .unwrap_err(),
            MemberError::Forbidden
        );
    }

    #[tokio::test]
    async fn unknown_member_is_not_found() {
        let (handler, _) = setup(today()).await;
        let missing = MemberId::new();
        let err = handler
            .handle(GetMemberQuery {
                actor: staff(),
                member_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, MemberError::NotFound(missing));
    }
}
