//! ListAccessLogHandler - Query handler for the door audit log.

use std::sync::Arc;

use crate::domain::access::{AccessError, AccessLogEntry};
use crate::domain::foundation::{AuthenticatedUser, MemberId};
use crate::ports::{AccessLogQuery, AccessLogRepository, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT};

#[derive(Debug, Clone)]
pub struct ListAccessLogQuery {
    pub actor: AuthenticatedUser,
    pub member_id: Option<MemberId>,
    pub limit: Option<u32>,
}

pub struct ListAccessLogHandler {
    log: Arc<dyn AccessLogRepository>,
}

impl ListAccessLogHandler {
    pub fn new(log: Arc<dyn AccessLogRepository>) -> Self {
        Self { log }
    }

    /// Newest entries first.
    pub async fn handle(&self, query: ListAccessLogQuery) -> Result<Vec<AccessLogEntry>, AccessError> {
        if !query.actor.role.is_staff() {
            return Err(AccessError::Forbidden);
        }

        let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
        if limit == 0 || limit > MAX_LOG_LIMIT {
            return Err(AccessError::validation(
                "limite",
                format!("must be between 1 and {}", MAX_LOG_LIMIT),
            ));
        }

        Ok(self
            .log
            .recent(&AccessLogQuery {
                member_id: query.member_id,
                limit,
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccessLogRepository;
    use crate::domain::access::{AccessChannel, AccessVerdict, VerdictReason};
    use crate::domain::foundation::{Role, UserId};

    fn actor(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("u").unwrap(), role)
    }

    #[tokio::test]
    async fn staff_reads_log() {
        let log = Arc::new(InMemoryAccessLogRepository::new());
        log.append(&AccessLogEntry::record(
            &AccessVerdict::denied(VerdictReason::TokenInvalid),
            AccessChannel::Qr,
        ))
        .await
        .unwrap();
        let handler = ListAccessLogHandler::new(log);

        let entries = handler
            .handle(ListAccessLogQuery {
                actor: actor(Role::Admin),
                member_id: None,
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn members_and_instructors_cannot_read_log() {
        let handler = ListAccessLogHandler::new(Arc::new(InMemoryAccessLogRepository::new()));
        for role in [Role::Socio, Role::Instructor] {
            let err = handler
                .handle(ListAccessLogQuery {
                    actor: actor(role),
                    member_id: None,
                    limit: None,
                })
                .await
                .unwrap_err();
            assert_eq!(err, AccessError::Forbidden);
        }
    }

    #[tokio::test]
    async fn oversized_limit_is_rejected() {
        let handler = ListAccessLogHandler::new(Arc::new(InMemoryAccessLogRepository::new()));
        let err = handler
            .handle(ListAccessLogQuery {
                actor: actor(Role::Recepcion),
                member_id: None,
                limit: Some(MAX_LOG_LIMIT + 1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::ValidationFailed { .. }));
    }
}
