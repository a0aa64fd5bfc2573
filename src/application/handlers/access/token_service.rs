//! AccessTokenService - issues, rotates, and resolves QR access tokens.
//!
//! Owns the only write path to the token store. Resolution always goes to
//! the store; there is no cache to go stale after a rotation.

use std::sync::Arc;

use crate::domain::access::{AccessToken, TokenValue};
use crate::domain::foundation::{DomainError, MemberId};
use crate::ports::AccessTokenRepository;

#[derive(Clone)]
pub struct AccessTokenService {
    tokens: Arc<dyn AccessTokenRepository>,
}

impl AccessTokenService {
    pub fn new(tokens: Arc<dyn AccessTokenRepository>) -> Self {
        Self { tokens }
    }

    /// Issues the first token of a newly registered member.
    pub async fn issue(&self, member_id: MemberId) -> Result<AccessToken, DomainError> {
        let token = AccessToken::issue(member_id);
        self.tokens.issue(&token).await?;
        tracing::info!(member_id = %member_id, "access token issued");
        Ok(token)
    }

    /// Replaces the live token. The old one stops resolving before this returns.
    pub async fn rotate(&self, member_id: MemberId) -> Result<AccessToken, DomainError> {
        let token = AccessToken::issue(member_id);
        self.tokens.rotate(&token).await?;
        tracing::info!(member_id = %member_id, "access token rotated");
        Ok(token)
    }

    /// Resolves untrusted input to the member whose live token it is.
    ///
    /// Input that cannot be a token resolves to `None` without a lookup.
    pub async fn resolve(&self, raw: &str) -> Result<Option<MemberId>, DomainError> {
        match TokenValue::parse(raw) {
            Some(token) => self.tokens.resolve(&token).await,
            None => Ok(None),
        }
    }

    pub async fn current(&self, member_id: &MemberId) -> Result<Option<AccessToken>, DomainError> {
        self.tokens.find_by_member(member_id).await
    }
}
