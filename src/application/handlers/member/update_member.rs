//! UpdateMemberHandler - Command handler for administrator edits.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MemberId, Role};
use crate::domain::membership::{Member, MemberChanges, MemberError};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub actor: AuthenticatedUser,
    pub member_id: MemberId,
    pub changes: MemberChanges,
}

pub struct UpdateMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl UpdateMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<Member, MemberError> {
        if cmd.actor.role != Role::Admin {
            return Err(MemberError::Forbidden);
        }
        if cmd.changes.is_empty() {
            return Err(MemberError::validation("body", "no fields to update"));
        }

        let mut member = self
            .members
            .find_by_id(&cmd.member_id)
            .await?
            .ok_or(MemberError::NotFound(cmd.member_id))?;

        if member.apply(cmd.changes) {
            self.members.update(&member).await?;
            tracing::info!(
                member_id = %member.id,
                estado = %member.status,
                fecha_vencimiento = %member.expires_on,
                "member updated"
            );
        }

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;
    use crate::domain::foundation::UserId;
    use crate::domain::membership::MemberStatus;
    use chrono::NaiveDate;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("admin").unwrap(), Role::Admin)
    }

    async fn setup() -> (UpdateMemberHandler, Arc<InMemoryMemberRepository>, Member) {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let member = Member::register("777", "Eva", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), None).unwrap();
        repo.save(&member).await.unwrap();
        (UpdateMemberHandler::new(repo.clone()), repo, member)
    }

    #[tokio::test]
    async fn admin_can_suspend_and_extend() {
        let (handler, repo, member) = setup().await;
        let new_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        handler
            .handle(UpdateMemberCommand {
                actor: admin(),
                member_id: member.id,
                changes: MemberChanges {
                    status: Some(MemberStatus::Suspended),
                    expires_on: Some(new_date),
                    plan: None,
                },
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(&member.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MemberStatus::Suspended);
        assert_eq!(stored.expires_on, new_date);
    }

    #[tokio::test]
    async fn reception_cannot_edit() {
        let (handler, _, member) = setup().await;
        let err = handler
            .handle(UpdateMemberCommand {
                actor: AuthenticatedUser::new(UserId::new("desk").unwrap(), Role::Recepcion),
                member_id: member.id,
                changes: MemberChanges {
                    status: Some(MemberStatus::Active),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err, MemberError::Forbidden);
    }

    #[tokio::test]
    async fn empty_edit_is_rejected() {
        let (handler, _, member) = setup().await;
        let err = handler
            .handle(UpdateMemberCommand {
                actor: admin(),
                member_id: member.id,
                changes: MemberChanges::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MemberError::ValidationFailed { .. }));
    }
}
