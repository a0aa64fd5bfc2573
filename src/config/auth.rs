//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Shortest HS256 key accepted.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Session token verification (HS256 bearer tokens from the console login)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC key used to sign session tokens
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim, if any
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim, if any
    #[serde(default)]
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            issuer: None,
            audience: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_missing_secret() {
        assert_eq!(
            AuthConfig::default().validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        assert_eq!(
            with_secret("too-short").validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN))
        );
    }

    #[test]
    fn test_validation_valid_secret() {
        assert!(with_secret(&"k".repeat(MIN_JWT_SECRET_LEN)).validate().is_ok());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let config = with_secret("super-secret-signing-key-0123456789");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
