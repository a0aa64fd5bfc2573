//! PostgreSQL implementation of AccessLogRepository.
//!
//! Only inserts and selects; a trigger on `access_log` rejects anything else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::access::{AccessChannel, AccessLogEntry, VerdictReason};
use crate::domain::foundation::{AccessLogId, DomainError, MemberId, Timestamp};
use crate::ports::{AccessLogQuery, AccessLogRepository};

use super::{db_error, stored_value};

pub struct PostgresAccessLogRepository {
    pool: PgPool,
}

impl PostgresAccessLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    member_id: Option<Uuid>,
    occurred_at: DateTime<Utc>,
    permitido: bool,
    codigo: String,
    canal: String,
}

impl TryFrom<LogRow> for AccessLogEntry {
    type Error = DomainError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let reason = VerdictReason::from_code(&row.codigo).ok_or_else(|| {
            DomainError::database(format!("Invalid stored access_log.codigo: {}", row.codigo))
        })?;

        Ok(AccessLogEntry {
            id: AccessLogId::from_uuid(row.id),
            member_id: row.member_id.map(MemberId::from_uuid),
            occurred_at: Timestamp::from_datetime(row.occurred_at),
            permitted: row.permitido,
            reason,
            channel: stored_value::<AccessChannel>("access_log.canal", &row.canal)?,
        })
    }
}

#[async_trait]
impl AccessLogRepository for PostgresAccessLogRepository {
    async fn append(&self, entry: &AccessLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO access_log (id, member_id, occurred_at, permitido, codigo, canal)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.member_id.map(|m| *m.as_uuid()))
        .bind(entry.occurred_at.as_datetime())
        .bind(entry.permitted)
        .bind(entry.reason.code())
        .bind(entry.channel.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("append access log", e))?;

        Ok(())
    }

    async fn recent(&self, query: &AccessLogQuery) -> Result<Vec<AccessLogEntry>, DomainError> {
        let rows: Vec<LogRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, occurred_at, permitido, codigo, canal
            FROM access_log
            WHERE $1::uuid IS NULL OR member_id = $1
            ORDER BY occurred_at DESC
            LIMIT $2
            "#,
        )
        .bind(query.member_id.map(|m| *m.as_uuid()))
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("read access log", e))?;

        rows.into_iter().map(AccessLogEntry::try_from).collect()
    }
}
