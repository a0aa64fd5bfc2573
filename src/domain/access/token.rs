//! QR access tokens.
//!
//! A token is 32 random bytes from the operating system RNG, encoded as
//! URL-safe base64 without padding. It is opaque: nothing about the member
//! can be derived from it, and the only way to resolve it is a lookup of the
//! single live token stored for that member.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

use crate::domain::foundation::{MemberId, Timestamp};

const TOKEN_BYTES: usize = 32;

/// Longest input accepted as a token candidate.
pub const MAX_TOKEN_LEN: usize = 128;

/// An opaque access token value.
///
/// `Debug` prints only a short prefix so tokens do not leak into logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenValue(String);

impl TokenValue {
    /// Generates a fresh unguessable token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Interprets untrusted input (a scanned QR payload or a query string).
    ///
    /// Returns `None` for input that cannot possibly be a live token: empty,
    /// oversized, or containing characters outside the URL-safe alphabet.
    /// Such input is unresolvable, never an error.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_TOKEN_LEN {
            return None;
        }
        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Rebuilds a token read back from storage.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "TokenValue({}***)", prefix)
    }
}

/// The live token of a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub member_id: MemberId,
    pub token: TokenValue,
    pub issued_at: Timestamp,
}

impl AccessToken {
    /// Creates a new token for the member.
    pub fn issue(member_id: MemberId) -> Self {
        Self {
            member_id,
            token: TokenValue::generate(),
            issued_at: Timestamp::now(),
        }
    }
}
