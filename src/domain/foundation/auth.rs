//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a session
//! token. They carry no provider dependencies; any identity service can
//! populate them through the `SessionValidator` port.
//!
//! The role decides which operations a caller may perform. A caller that is
//! also a gym member carries the member id so self-service endpoints can be
//! scoped to their own data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{MemberId, UserId, ValidationError};

/// Caller role within the gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Recepcion,
    Instructor,
    Socio,
}

impl Role {
    /// Front desk or administration.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Recepcion)
    }

    /// May record attendance on a class roster.
    pub fn can_take_attendance(&self) -> bool {
        self.is_staff() || matches!(self, Role::Instructor)
    }

    /// May approve or reject exercises in a routine. Instructors only.
    pub fn can_review_exercises(&self) -> bool {
        matches!(self, Role::Instructor)
    }

    /// May write routines and read any member's routine.
    pub fn can_author_routines(&self) -> bool {
        matches!(self, Role::Admin | Role::Instructor)
    }

    /// May create and cancel classes.
    pub fn can_manage_classes(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Recepcion => "recepcion",
            Role::Instructor => "instructor",
            Role::Socio => "socio",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "recepcion" | "reception" => Ok(Role::Recepcion),
            "instructor" => Ok(Role::Instructor),
            "socio" | "member" => Ok(Role::Socio),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Authenticated caller extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Subject identifier from the identity provider.
    pub user_id: UserId,

    /// Member profile linked to this account, if any.
    pub member_id: Option<MemberId>,

    pub role: Role,

    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            member_id: None,
            role,
            display_name: None,
        }
    }

    /// Links the caller to a member profile.
    pub fn with_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// True when the caller may act on data owned by `member_id`.
    ///
    /// Staff act on behalf of any member; members only on themselves.
    pub fn can_act_for(&self, member_id: &MemberId) -> bool {
        self.role.is_staff() || self.member_id.as_ref() == Some(member_id)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Caller is authenticated but lacks the role for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn staff_roles_are_admin_and_reception() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Recepcion.is_staff());
        assert!(!Role::Instructor.is_staff());
        assert!(!Role::Socio.is_staff());
    }

    #[test]
    fn instructors_take_attendance_but_members_do_not() {
        assert!(Role::Instructor.can_take_attendance());
        assert!(Role::Recepcion.can_take_attendance());
        assert!(!Role::Socio.can_take_attendance());
    }

    #[test]
    fn only_instructors_and_admins_review_exercises() {
        assert!(Role::Instructor.can_review_exercises());
        assert!(!Role::Admin.can_review_exercises());
        assert!(!Role::Recepcion.can_review_exercises());
        assert!(Role::Admin.can_author_routines());
        assert!(Role::Instructor.can_author_routines());
        assert!(!Role::Socio.can_author_routines());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("RECEPCION".parse::<Role>().unwrap(), Role::Recepcion);
        assert_eq!("member".parse::<Role>().unwrap(), Role::Socio);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn member_can_act_only_for_self() {
        let own = MemberId::new();
        let user = AuthenticatedUser::new(test_user_id(), Role::Socio).with_member(own);

        assert!(user.can_act_for(&own));
        assert!(!user.can_act_for(&MemberId::new()));
    }

    #[test]
    fn staff_can_act_for_anyone() {
        let user = AuthenticatedUser::new(test_user_id(), Role::Recepcion);
        assert!(user.can_act_for(&MemberId::new()));
    }

    #[test]
    fn auth_error_reauth_classification() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
