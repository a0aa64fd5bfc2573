//! Recorded membership status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Status recorded on the member profile.
///
/// This is what payment processing and administrators write. It is
/// informative only: access decisions always combine it with the expiry
/// date through `MembershipStatusEvaluator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "suspendido")]
    Suspended,
    #[serde(rename = "inactivo")]
    Inactive,
}

impl MemberStatus {
    /// Persisted and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "activo",
            MemberStatus::Suspended => "suspendido",
            MemberStatus::Inactive => "inactivo",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "activo" => Ok(MemberStatus::Active),
            "suspendido" => Ok(MemberStatus::Suspended),
            "inactivo" => Ok(MemberStatus::Inactive),
            other => Err(ValidationError::invalid_format(
                "estado",
                format!("unknown member status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_persisted_values() {
        assert_eq!("activo".parse::<MemberStatus>().unwrap(), MemberStatus::Active);
        assert_eq!("SUSPENDIDO".parse::<MemberStatus>().unwrap(), MemberStatus::Suspended);
        assert!("moroso".parse::<MemberStatus>().is_err());
    }

    #[test]
    fn serializes_with_spanish_names() {
        let json = serde_json::to_string(&MemberStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactivo\"");
    }
}
