//! PostgreSQL implementation of AccessTokenRepository.
//!
//! `access_tokens` is keyed by member, so a rotation is one upsert that
//! overwrites the previous value. Resolution always queries the table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::access::{AccessToken, TokenValue};
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp};
use crate::ports::AccessTokenRepository;

use super::db_error;

pub struct PostgresAccessTokenRepository {
    pool: PgPool,
}

impl PostgresAccessTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TokenRow {
    member_id: Uuid,
    token: String,
    issued_at: DateTime<Utc>,
}

impl From<TokenRow> for AccessToken {
    fn from(row: TokenRow) -> Self {
        AccessToken {
            member_id: MemberId::from_uuid(row.member_id),
            token: TokenValue::from_stored(row.token),
            issued_at: Timestamp::from_datetime(row.issued_at),
        }
    }
}

#[async_trait]
impl AccessTokenRepository for PostgresAccessTokenRepository {
    async fn issue(&self, token: &AccessToken) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO access_tokens (member_id, token, issued_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (member_id) DO NOTHING
            "#,
        )
        .bind(token.member_id.as_uuid())
        .bind(token.token.as_str())
        .bind(token.issued_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("issue access token", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TokenAlreadyIssued,
                format!("Member {} already has a live token", token.member_id),
            ));
        }

        Ok(())
    }

    async fn rotate(&self, token: &AccessToken) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens (member_id, token, issued_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (member_id) DO UPDATE
                SET token = EXCLUDED.token, issued_at = EXCLUDED.issued_at
            "#,
        )
        .bind(token.member_id.as_uuid())
        .bind(token.token.as_str())
        .bind(token.issued_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("rotate access token", e))?;

        Ok(())
    }

    async fn resolve(&self, token: &TokenValue) -> Result<Option<MemberId>, DomainError> {
        let member: Option<(Uuid,)> =
            sqlx::query_as("SELECT member_id FROM access_tokens WHERE token = $1")
                .bind(token.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("resolve access token", e))?;

        Ok(member.map(|(id,)| MemberId::from_uuid(id)))
    }

    async fn find_by_member(&self, member_id: &MemberId) -> Result<Option<AccessToken>, DomainError> {
        let row: Option<TokenRow> = sqlx::query_as(
            "SELECT member_id, token, issued_at FROM access_tokens WHERE member_id = $1",
        )
        .bind(member_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch access token", e))?;

        Ok(row.map(AccessToken::from))
    }
}
