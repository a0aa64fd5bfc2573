//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Generates a UUID-backed identifier newtype.
///
/// Every generated type is `Copy`, serializes transparently as the UUID
/// string, and parses from the canonical hyphenated form.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a gym member (socio).
    MemberId
);

uuid_id!(
    /// Unique identifier for a scheduled class.
    ClassId
);

uuid_id!(
    /// Unique identifier for a class reservation (reserva).
    ReservationId
);

uuid_id!(
    /// Unique identifier for an access log entry.
    AccessLogId
);

uuid_id!(
    /// Unique identifier for a training routine.
    RoutineId
);

uuid_id!(
    /// Unique identifier for an exercise inside a routine.
    ExerciseId
);

uuid_id!(
    /// Reference to the instructor leading a class.
    InstructorId
);

/// User identifier (typically from auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_id_generates_unique_values() {
        assert_ne!(MemberId::new(), MemberId::new());
    }

    #[test]
    fn class_id_parses_from_display_output() {
        let id = ClassId::new();
        let parsed: ClassId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn reservation_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ReservationId>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ExerciseId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert_eq!(UserId::new("auth0|42").unwrap().as_str(), "auth0|42");
    }
}
