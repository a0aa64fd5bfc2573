//! AccessVerifier - decides at the door whether a member may enter.
//!
//! Two ways in:
//! - QR: the scanned token is resolved to a member first
//! - Manual: front desk types a member id or documento
//!
//! Both end in the same `decide` call. Verification never fails: storage
//! trouble yields a denial, and a log write failure is reported without
//! touching the verdict that was already computed.

use std::sync::Arc;

use crate::domain::access::{
    decide, AccessChannel, AccessLogEntry, AccessVerdict, VerdictReason,
};
use crate::domain::foundation::{GymClock, MemberId};
use crate::domain::membership::Member;
use crate::ports::{AccessLogRepository, MemberRepository};

use super::AccessTokenService;

/// How front desk identifies a member without a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualIdentifier {
    MemberId(MemberId),
    Documento(String),
}

/// Verdict of a logged entry attempt.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub verdict: AccessVerdict,
    /// False when the audit entry could not be written.
    pub logged: bool,
}

#[derive(Clone)]
pub struct AccessVerifier {
    tokens: AccessTokenService,
    members: Arc<dyn MemberRepository>,
    log: Arc<dyn AccessLogRepository>,
    clock: GymClock,
}

impl AccessVerifier {
    pub fn new(
        tokens: AccessTokenService,
        members: Arc<dyn MemberRepository>,
        log: Arc<dyn AccessLogRepository>,
        clock: GymClock,
    ) -> Self {
        Self {
            tokens,
            members,
            log,
            clock,
        }
    }

    /// Dry run: computes the verdict for a token without logging it.
    pub async fn verify(&self, raw_token: &str) -> AccessVerdict {
        let member_id = match self.tokens.resolve(raw_token).await {
            Ok(Some(id)) => id,
            Ok(None) => return AccessVerdict::denied(VerdictReason::TokenInvalid),
            Err(e) => {
                tracing::error!(error = %e, "token resolution failed; denying");
                return AccessVerdict::denied(VerdictReason::Unavailable);
            }
        };

        // A token without a member is as good as no token.
        self.judge(self.members.find_by_id(&member_id).await, VerdictReason::TokenInvalid)
    }

    /// Door entry with a QR token. Always appends to the audit log.
    pub async fn enter(&self, raw_token: &str) -> EntryOutcome {
        let verdict = self.verify(raw_token).await;
        self.record(verdict, AccessChannel::Qr).await
    }

    /// Manual front-desk entry. Same rules as `enter`, minus token resolution.
    pub async fn register_access(&self, identifier: &ManualIdentifier) -> EntryOutcome {
        let lookup = match identifier {
            ManualIdentifier::MemberId(id) => self.members.find_by_id(id).await,
            ManualIdentifier::Documento(doc) => self.members.find_by_documento(doc.trim()).await,
        };
        let verdict = self.judge(lookup, VerdictReason::MemberNotFound);
        self.record(verdict, AccessChannel::Manual).await
    }

    fn judge<E: std::fmt::Display>(
        &self,
        lookup: Result<Option<Member>, E>,
        missing: VerdictReason,
    ) -> AccessVerdict {
        match lookup {
            Ok(Some(member)) => decide(&member, self.clock.today()),
            Ok(None) => AccessVerdict::denied(missing),
            Err(e) => {
                tracing::error!(error = %e, "member lookup failed; denying");
                AccessVerdict::denied(VerdictReason::Unavailable)
            }
        }
    }

    async fn record(&self, verdict: AccessVerdict, channel: AccessChannel) -> EntryOutcome {
        let entry = AccessLogEntry::record(&verdict, channel);
        let logged = match self.log.append(&entry).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    permitted = verdict.permitted,
                    codigo = verdict.reason.code(),
                    "access log append failed; verdict stands"
                );
                false
            }
        };

        if verdict.permitted {
            tracing::info!(channel = %channel, member_id = ?verdict.member_id(), "access granted");
        } else {
            tracing::warn!(
                channel = %channel,
                member_id = ?verdict.member_id(),
                codigo = verdict.reason.code(),
                "access denied"
            );
        }

        EntryOutcome { verdict, logged }
    }
}
