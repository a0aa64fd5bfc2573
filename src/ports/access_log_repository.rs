//! Access audit log port. Append-only: no update, no delete.

use async_trait::async_trait;

use crate::domain::access::AccessLogEntry;
use crate::domain::foundation::{DomainError, MemberId};

/// Default page size for log queries.
pub const DEFAULT_LOG_LIMIT: u32 = 50;

/// Largest page a caller may request.
pub const MAX_LOG_LIMIT: u32 = 500;

/// Filter for reading the log, newest entries first.
#[derive(Debug, Clone)]
pub struct AccessLogQuery {
    pub member_id: Option<MemberId>,
    pub limit: u32,
}

impl Default for AccessLogQuery {
    fn default() -> Self {
        Self {
            member_id: None,
            limit: DEFAULT_LOG_LIMIT,
        }
    }
}

#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    async fn append(&self, entry: &AccessLogEntry) -> Result<(), DomainError>;

    async fn recent(&self, query: &AccessLogQuery) -> Result<Vec<AccessLogEntry>, DomainError>;
}
