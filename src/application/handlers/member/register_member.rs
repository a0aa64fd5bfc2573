//! RegisterMemberHandler - Command handler for registering a member.
//!
//! Registration also issues the member's first access token, so a new
//! member can show a QR code at the door straight away. A member whose
//! token could not be issued is removed again.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::handlers::access::AccessTokenService;
use crate::domain::access::AccessToken;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::{Member, MemberError};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    pub actor: AuthenticatedUser,
    pub documento: String,
    pub nombre: String,
    pub expires_on: NaiveDate,
    pub plan: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegisterMemberResult {
    pub member: Member,
    pub token: AccessToken,
}

pub struct RegisterMemberHandler {
    members: Arc<dyn MemberRepository>,
    tokens: AccessTokenService,
}

impl RegisterMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, tokens: AccessTokenService) -> Self {
        Self { members, tokens }
    }

    pub async fn handle(
        &self,
        cmd: RegisterMemberCommand,
    ) -> Result<RegisterMemberResult, MemberError> {
        if !cmd.actor.role.is_staff() {
            return Err(MemberError::Forbidden);
        }

        let member = Member::register(cmd.documento, cmd.nombre, cmd.expires_on, cmd.plan)?;

        // The store's unique documento constraint decides concurrent registrations.
        self.members.save(&member).await?;

        let token = match self.tokens.issue(member.id).await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(member_id = %member.id, error = %e, "first token not issued; rolling back member");
                if let Err(rollback) = self.members.delete(&member.id).await {
                    tracing::error!(member_id = %member.id, error = %rollback, "member rollback failed");
                }
                return Err(MemberError::infrastructure(e.to_string()));
            }
        };

        tracing::info!(member_id = %member.id, actor = %cmd.actor.user_id, "member registered");

        Ok(RegisterMemberResult { member, token })
    }
}
