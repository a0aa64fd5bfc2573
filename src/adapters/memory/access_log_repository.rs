//! In-memory access log. Only ever appended to.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::access::AccessLogEntry;
use crate::domain::foundation::DomainError;
use crate::ports::{AccessLogQuery, AccessLogRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessLogRepository {
    entries: Arc<RwLock<Vec<AccessLogEntry>>>,
}

impl InMemoryAccessLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl AccessLogRepository for InMemoryAccessLogRepository {
    async fn append(&self, entry: &AccessLogEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn recent(&self, query: &AccessLogQuery) -> Result<Vec<AccessLogEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| query.member_id.map_or(true, |id| e.member_id == Some(id)))
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}
