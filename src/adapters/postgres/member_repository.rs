//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp};
use crate::domain::membership::{Member, MemberStatus};
use crate::ports::MemberRepository;

use super::{db_error, stored_value};

const DOCUMENTO_CONSTRAINT: &str = "members_documento_key";

pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    documento: String,
    nombre: String,
    estado: String,
    fecha_vencimiento: NaiveDate,
    plan: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: MemberId::from_uuid(row.id),
            documento: row.documento,
            nombre: row.nombre,
            status: stored_value::<MemberStatus>("members.estado", &row.estado)?,
            expires_on: row.fecha_vencimiento,
            plan: row.plan,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_MEMBER: &str = r#"
    SELECT id, documento, nombre, estado, fecha_vencimiento, plan, created_at, updated_at
    FROM members
"#;

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, documento, nombre, estado, fecha_vencimiento, plan, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.documento)
        .bind(&member.nombre)
        .bind(member.status.as_str())
        .bind(member.expires_on)
        .bind(&member.plan)
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(DOCUMENTO_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::DocumentoTaken,
                        "Another member already uses this documento",
                    )
                    .with_detail("documento", member.documento.clone());
                }
            }
            db_error("save member", e)
        })?;

        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                estado = $2,
                fecha_vencimiento = $3,
                plan = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.status.as_str())
        .bind(member.expires_on)
        .bind(&member.plan)
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("Member not found: {}", member.id),
            )
            .with_detail("member_id", member.id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete member", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_MEMBER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch member", e))?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_documento(&self, documento: &str) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> =
            sqlx::query_as(&format!("{} WHERE documento = $1", SELECT_MEMBER))
                .bind(documento.trim())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("fetch member by documento", e))?;

        row.map(Member::try_from).transpose()
    }
}
