//! Access audit log entries. Append-only.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AccessLogId, MemberId, Timestamp, ValidationError};

use super::{AccessVerdict, VerdictReason};

/// How the member was identified at the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessChannel {
    Qr,
    Manual,
}

impl AccessChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessChannel::Qr => "qr",
            AccessChannel::Manual => "manual",
        }
    }
}

impl fmt::Display for AccessChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessChannel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr" => Ok(AccessChannel::Qr),
            "manual" => Ok(AccessChannel::Manual),
            other => Err(ValidationError::invalid_format(
                "canal",
                format!("unknown access channel '{}'", other),
            )),
        }
    }
}

/// One door decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub id: AccessLogId,
    /// Absent when the presented token did not resolve to anyone.
    pub member_id: Option<MemberId>,
    pub occurred_at: Timestamp,
    pub permitted: bool,
    pub reason: VerdictReason,
    pub channel: AccessChannel,
}

impl AccessLogEntry {
    pub fn record(verdict: &AccessVerdict, channel: AccessChannel) -> Self {
        Self {
            id: AccessLogId::new(),
            member_id: verdict.member_id(),
            occurred_at: Timestamp::now(),
            permitted: verdict.permitted,
            reason: verdict.reason,
            channel,
        }
    }

    pub fn motivo(&self) -> &'static str {
        self.reason.motivo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_copies_verdict() {
        let verdict = AccessVerdict::denied(VerdictReason::TokenInvalid);
        let entry = AccessLogEntry::record(&verdict, AccessChannel::Qr);

        assert!(!entry.permitted);
        assert_eq!(entry.member_id, None);
        assert_eq!(entry.motivo(), "token inválido");
        assert_eq!(entry.channel, AccessChannel::Qr);
    }

    #[test]
    fn channel_parses() {
        assert_eq!("manual".parse::<AccessChannel>().unwrap(), AccessChannel::Manual);
        assert!("nfc".parse::<AccessChannel>().is_err());
    }
}
