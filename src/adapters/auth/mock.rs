//! Mock session validator for tests and local development.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_user("desk-token", AuthenticatedUser::new(UserId::new("desk")?, Role::Recepcion));
//! assert!(validator.validate("desk-token").await.is_ok());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, MemberId, Role, UserId};
use crate::ports::SessionValidator;

/// Maps fixed bearer strings to users. Unknown bearers are `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.get_mut().insert(token.into(), user);
        self
    }

    /// Adds a staff or instructor user whose id is `user_id`.
    pub fn with_role(self, token: impl Into<String>, user_id: &str, role: Role) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_user(token, AuthenticatedUser::new(id, role)),
            Err(_) => self,
        }
    }

    /// Adds a member user linked to `member_id`.
    pub fn with_member(self, token: impl Into<String>, member_id: MemberId) -> Self {
        match UserId::new(format!("socio-{}", member_id)) {
            Ok(id) => self.with_user(
                token,
                AuthenticatedUser::new(id, Role::Socio).with_member(member_id),
            ),
            Err(_) => self,
        }
    }

    /// Every validation fails with `error`.
    pub fn with_error(mut self, error: AuthError) -> Self {
        *self.force_error.get_mut() = Some(error);
        self
    }

    pub async fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().await.insert(token.into(), user);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().await.clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
