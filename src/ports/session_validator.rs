//! Session validation port.
//!
//! Authentication is an external collaborator: the console's login flow
//! issues a bearer token, and this port turns it into the caller's identity
//! and role. Nothing in the core reads ambient session state.
//!
//! # Contract
//!
//! Implementations must:
//! - Validate the token signature and expiry
//! - Validate issuer and audience when configured
//! - Return `AuthError::InvalidToken` for malformed or badly signed tokens
//! - Return `AuthError::TokenExpired` for expired tokens

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a bearer token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_validator_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
