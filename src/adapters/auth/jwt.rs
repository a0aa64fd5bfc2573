//! HS256 JWT session validator.
//!
//! The console's login service signs a short-lived JWT with a shared
//! secret. This adapter checks signature, expiry, and (when configured)
//! issuer and audience, then maps the claims to an `AuthenticatedUser`.
//!
//! # Claims
//!
//! | Claim | Meaning |
//! |-------|---------|
//! | `sub` | user id |
//! | `role` | `admin`, `recepcion`, `instructor`, `socio` |
//! | `socio_id` | member UUID linked to the user (members only) |
//! | `name` | display name |
//! | `exp` | expiry, Unix seconds |

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{AuthError, AuthenticatedUser, MemberId, Role, UserId};
use crate::ports::SessionValidator;

/// Claims carried by console session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socio_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(secret: &Secret<String>, issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    fn claims_to_user(claims: SessionClaims) -> Result<AuthenticatedUser, AuthError> {
        let user_id = UserId::new(claims.sub.as_str()).map_err(|_| {
            tracing::warn!("session token has an empty subject");
            AuthError::InvalidToken
        })?;

        let role: Role = claims.role.parse().map_err(|_| {
            tracing::warn!(role = %claims.role, "session token has an unknown role");
            AuthError::InvalidToken
        })?;

        let mut user = AuthenticatedUser::new(user_id, role);
        if let Some(socio_id) = claims.socio_id {
            user = user.with_member(MemberId::from_uuid(socio_id));
        }
        if let Some(name) = claims.name {
            user = user.with_display_name(name);
        }
        Ok(user)
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("session token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!(error = %e, "session token rejected");
                    AuthError::InvalidToken
                }
            }
        })?;

        Self::claims_to_user(data.claims)
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret-with-enough-length";

    fn secret() -> Secret<String> {
        Secret::new(SECRET.to_string())
    }

    fn claims(role: &str, exp_offset_secs: i64) -> SessionClaims {
        SessionClaims {
            sub: "user-42".to_string(),
            role: role.to_string(),
            socio_id: None,
            name: Some("Ana".to_string()),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            iss: Some("gym-console".to_string()),
            aud: None,
        }
    }

    fn sign(claims: &SessionClaims, key: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accepted tokens
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn maps_member_claims() {
        let validator = JwtSessionValidator::new(&secret(), Some("gym-console"), None);
        let member = Uuid::new_v4();
        let mut c = claims("socio", 600);
        c.socio_id = Some(member);

        let user = validator.validate(&sign(&c, SECRET)).await.unwrap();

        assert_eq!(user.role, Role::Socio);
        assert_eq!(user.member_id, Some(MemberId::from_uuid(member)));
        assert_eq!(user.display_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn staff_token_has_no_member() {
        let validator = JwtSessionValidator::new(&secret(), None, None);
        let user = validator
            .validate(&sign(&claims("recepcion", 600), SECRET))
            .await
            .unwrap();
        assert!(user.role.is_staff());
        assert!(user.member_id.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejected tokens
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let validator = JwtSessionValidator::new(&secret(), None, None);
        let err = validator
            .validate(&sign(&claims("admin", -3600), SECRET))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_signature_is_invalid() {
        let validator = JwtSessionValidator::new(&secret(), None, None);
        let err = validator
            .validate(&sign(&claims("admin", 600), "another-secret-entirely-different"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_issuer_is_invalid() {
        let validator = JwtSessionValidator::new(&secret(), Some("other-issuer"), None);
        let err = validator
            .validate(&sign(&claims("admin", 600), SECRET))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn unknown_role_is_invalid() {
        let validator = JwtSessionValidator::new(&secret(), None, None);
        let err = validator
            .validate(&sign(&claims("janitor", 600), SECRET))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        let validator = JwtSessionValidator::new(&secret(), None, None);
        assert!(matches!(
            validator.validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
