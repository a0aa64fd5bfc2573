//! RotateTokenHandler - Command handler for replacing a member's QR token.

use std::sync::Arc;

use crate::domain::access::{AccessError, AccessToken};
use crate::domain::foundation::{AuthenticatedUser, MemberId};
use crate::ports::MemberRepository;

use super::AccessTokenService;

#[derive(Debug, Clone)]
pub struct RotateTokenCommand {
    pub actor: AuthenticatedUser,
    pub member_id: MemberId,
}

pub struct RotateTokenHandler {
    members: Arc<dyn MemberRepository>,
    tokens: AccessTokenService,
}

impl RotateTokenHandler {
    pub fn new(members: Arc<dyn MemberRepository>, tokens: AccessTokenService) -> Self {
        Self { members, tokens }
    }

    pub async fn handle(&self, cmd: RotateTokenCommand) -> Result<AccessToken, AccessError> {
        if !cmd.actor.can_act_for(&cmd.member_id) {
            return Err(AccessError::Forbidden);
        }

        if self.members.find_by_id(&cmd.member_id).await?.is_none() {
            return Err(AccessError::MemberNotFound(cmd.member_id));
        }

        let token = self.tokens.rotate(cmd.member_id).await?;
        tracing::info!(member_id = %cmd.member_id, actor = %cmd.actor.user_id, "QR token rotated on request");
        Ok(token)
    }
}
