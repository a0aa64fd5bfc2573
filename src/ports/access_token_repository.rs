//! Access token repository port.
//!
//! Holds exactly one live token per member. The store is the only source of
//! truth for resolution; adapters must not cache resolved tokens, so a
//! rotation is visible to the very next `resolve`.

use async_trait::async_trait;

use crate::domain::access::{AccessToken, TokenValue};
use crate::domain::foundation::{DomainError, MemberId};

#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Stores the first token of a member.
    ///
    /// # Errors
    ///
    /// - `TokenAlreadyIssued` if the member already has a live token
    /// - `DatabaseError` on persistence failure
    async fn issue(&self, token: &AccessToken) -> Result<(), DomainError>;

    /// Replaces the member's live token in one atomic step, creating it if
    /// absent. Once this returns, the previous token no longer resolves.
    async fn rotate(&self, token: &AccessToken) -> Result<(), DomainError>;

    /// Member owning this token, if it is the live one.
    async fn resolve(&self, token: &TokenValue) -> Result<Option<MemberId>, DomainError>;

    async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<AccessToken>, DomainError>;
}
