//! In-memory access token store.
//!
//! Both indexes live behind one lock so rotation swaps them together: there
//! is no moment where the old token still resolves after the new one is
//! visible.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::access::{AccessToken, TokenValue};
use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::ports::AccessTokenRepository;

#[derive(Debug, Default)]
struct TokenIndex {
    by_member: HashMap<MemberId, AccessToken>,
    by_token: HashMap<TokenValue, MemberId>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessTokenRepository {
    index: Arc<RwLock<TokenIndex>>,
}

impl InMemoryAccessTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn issue(&self, token: &AccessToken) -> Result<(), DomainError> {
        let mut index = self.index.write().await;
        if index.by_member.contains_key(&token.member_id) {
            return Err(DomainError::new(
                ErrorCode::TokenAlreadyIssued,
                format!("Member {} already has a live token", token.member_id),
            ));
        }
        index.by_token.insert(token.token.clone(), token.member_id);
        index.by_member.insert(token.member_id, token.clone());
        Ok(())
    }

    async fn rotate(&self, token: &AccessToken) -> Result<(), DomainError> {
        let mut index = self.index.write().await;
        if let Some(previous) = index.by_member.insert(token.member_id, token.clone()) {
            index.by_token.remove(&previous.token);
        }
        index.by_token.insert(token.token.clone(), token.member_id);
        Ok(())
    }

    async fn resolve(&self, token: &TokenValue) -> Result<Option<MemberId>, DomainError> {
        Ok(self.index.read().await.by_token.get(token).copied())
    }

    async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<AccessToken>, DomainError> {
        Ok(self.index.read().await.by_member.get(member_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rotation_unlinks_previous_token() {
        let repo = InMemoryAccessTokenRepository::new();
        let member = MemberId::new();
        let first = AccessToken::issue(member);
        repo.issue(&first).await.unwrap();

        let second = AccessToken::issue(member);
        repo.rotate(&second).await.unwrap();

        assert_eq!(repo.resolve(&first.token).await.unwrap(), None);
        assert_eq!(repo.resolve(&second.token).await.unwrap(), Some(member));
        assert_eq!(
            repo.find_by_member(&member).await.unwrap().unwrap().token,
            second.token
        );
    }

    #[tokio::test]
    async fn issue_twice_is_rejected() {
        let repo = InMemoryAccessTokenRepository::new();
        let member = MemberId::new();
        repo.issue(&AccessToken::issue(member)).await.unwrap();

        let err = repo.issue(&AccessToken::issue(member)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenAlreadyIssued);
    }

    #[tokio::test]
    async fn rotate_creates_missing_token() {
        let repo = InMemoryAccessTokenRepository::new();
        let token = AccessToken::issue(MemberId::new());
        repo.rotate(&token).await.unwrap();
        assert!(repo.resolve(&token.token).await.unwrap().is_some());
    }
}
