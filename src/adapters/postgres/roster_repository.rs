//! PostgreSQL implementation of RosterRepository.
//!
//! A lease is an open transaction that has taken a row lock on the class
//! (`SELECT ... FOR UPDATE`). Any other lease on the same class blocks on
//! that row until the transaction ends; leases on other classes lock other
//! rows and run in parallel. Committing writes only rows that changed.
//! Dropping the lease rolls the transaction back.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::foundation::{
    ClassId, DomainError, InstructorId, MemberId, ReservationId, Timestamp,
};
use crate::domain::scheduling::{
    BookingOrigin, ClassRoster, ClassSchedule, ClassStatus, GymClass, Occupancy, Reservation,
    ReservationStatus,
};
use crate::ports::{ClassSummary, RosterLease, RosterRepository};

use super::{db_error, stored_value};

pub struct PostgresRosterRepository {
    pool: PgPool,
}

impl PostgresRosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
struct ClassRow {
    id: Uuid,
    nombre: String,
    fecha: NaiveDate,
    hora_inicio: NaiveTime,
    hora_fin: NaiveTime,
    cupo: i32,
    estado: String,
    instructor_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<ClassRow> for GymClass {
    type Error = DomainError;

    fn try_from(row: ClassRow) -> Result<Self, Self::Error> {
        let schedule = ClassSchedule::new(row.fecha, row.hora_inicio, row.hora_fin)
            .map_err(|e| DomainError::database(format!("Invalid stored schedule: {}", e)))?;
        let capacity = u32::try_from(row.cupo)
            .map_err(|_| DomainError::database(format!("Invalid stored cupo: {}", row.cupo)))?;

        Ok(GymClass {
            id: ClassId::from_uuid(row.id),
            name: row.nombre,
            schedule,
            capacity,
            status: stored_value::<ClassStatus>("classes.estado", &row.estado)?,
            instructor_id: row.instructor_id.map(InstructorId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClassSummaryRow {
    #[sqlx(flatten)]
    class: ClassRow,
    ocupados: i64,
}

impl TryFrom<ClassSummaryRow> for ClassSummary {
    type Error = DomainError;

    fn try_from(row: ClassSummaryRow) -> Result<Self, Self::Error> {
        let class = GymClass::try_from(row.class)?;
        Ok(ClassSummary {
            occupancy: Occupancy {
                capacity: class.capacity,
                occupied: u32::try_from(row.ocupados).unwrap_or(u32::MAX),
            },
            class,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    class_id: Uuid,
    member_id: Uuid,
    estado: String,
    origen: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DomainError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: ReservationId::from_uuid(row.id),
            class_id: ClassId::from_uuid(row.class_id),
            member_id: MemberId::from_uuid(row.member_id),
            status: stored_value::<ReservationStatus>("reservations.estado", &row.estado)?,
            origin: stored_value::<BookingOrigin>("reservations.origen", &row.origen)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const CLASS_COLUMNS: &str = r#"
    c.id, c.nombre, c.fecha, c.hora_inicio, c.hora_fin, c.cupo, c.estado,
    c.instructor_id, c.created_at, c.updated_at, c.cancelled_at
"#;

const RESERVATION_COLUMNS: &str =
    "id, class_id, member_id, estado, origen, created_at, updated_at";

fn summary_query(filter: &str) -> String {
    format!(
        r#"
        SELECT {columns},
            (SELECT COUNT(*) FROM reservations r
             WHERE r.class_id = c.id AND r.estado IN ('reservado', 'asistio')) AS ocupados
        FROM classes c
        {filter}
        ORDER BY c.fecha, c.hora_inicio
        "#,
        columns = CLASS_COLUMNS,
        filter = filter,
    )
}

async fn load_reservations(
    conn: &mut PgConnection,
    class_id: &ClassId,
) -> Result<Vec<Reservation>, DomainError> {
    let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
        "SELECT {} FROM reservations WHERE class_id = $1 ORDER BY created_at",
        RESERVATION_COLUMNS
    ))
    .bind(class_id.as_uuid())
    .fetch_all(conn)
    .await
    .map_err(|e| db_error("load reservations", e))?;

    rows.into_iter().map(Reservation::try_from).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Lease
// ════════════════════════════════════════════════════════════════════════════

struct PostgresRosterLease {
    tx: Transaction<'static, Postgres>,
    loaded: ClassRoster,
    roster: ClassRoster,
}

#[async_trait]
impl RosterLease for PostgresRosterLease {
    fn roster(&self) -> &ClassRoster {
        &self.roster
    }

    fn roster_mut(&mut self) -> &mut ClassRoster {
        &mut self.roster
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let PostgresRosterLease {
            mut tx,
            loaded,
            roster,
        } = *self;

        let class = roster.class();
        if class != loaded.class() {
            sqlx::query(
                "UPDATE classes SET estado = $2, updated_at = $3, cancelled_at = $4 WHERE id = $1",
            )
            .bind(class.id.as_uuid())
            .bind(class.status.as_str())
            .bind(class.updated_at.as_datetime())
            .bind(class.cancelled_at.as_ref().map(|t| *t.as_datetime()))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("update class", e))?;
        }

        let before: HashMap<ReservationId, &Reservation> =
            loaded.reservations().iter().map(|r| (r.id, r)).collect();

        for reservation in roster.reservations() {
            match before.get(&reservation.id) {
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO reservations (
                            id, class_id, member_id, estado, origen, created_at, updated_at
                        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                        "#,
                    )
                    .bind(reservation.id.as_uuid())
                    .bind(reservation.class_id.as_uuid())
                    .bind(reservation.member_id.as_uuid())
                    .bind(reservation.status.as_str())
                    .bind(reservation.origin.as_str())
                    .bind(reservation.created_at.as_datetime())
                    .bind(reservation.updated_at.as_datetime())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("insert reservation", e))?;
                }
                Some(previous) if *previous != reservation => {
                    sqlx::query("UPDATE reservations SET estado = $2, updated_at = $3 WHERE id = $1")
                        .bind(reservation.id.as_uuid())
                        .bind(reservation.status.as_str())
                        .bind(reservation.updated_at.as_datetime())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| db_error("update reservation", e))?;
                }
                Some(_) => {}
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit roster", e))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Repository
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    async fn create_class(&self, class: &GymClass) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO classes (
                id, nombre, fecha, hora_inicio, hora_fin, cupo, estado,
                instructor_id, created_at, updated_at, cancelled_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(class.id.as_uuid())
        .bind(&class.name)
        .bind(class.schedule.date)
        .bind(class.schedule.starts_at)
        .bind(class.schedule.ends_at)
        .bind(i32::try_from(class.capacity).unwrap_or(i32::MAX))
        .bind(class.status.as_str())
        .bind(class.instructor_id.map(|i| *i.as_uuid()))
        .bind(class.created_at.as_datetime())
        .bind(class.updated_at.as_datetime())
        .bind(class.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("create class", e))?;

        Ok(())
    }

    async fn find_class(&self, id: &ClassId) -> Result<Option<ClassSummary>, DomainError> {
        let row: Option<ClassSummaryRow> = sqlx::query_as(&summary_query("WHERE c.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch class", e))?;

        row.map(ClassSummary::try_from).transpose()
    }

    async fn list_classes(&self, date: Option<NaiveDate>) -> Result<Vec<ClassSummary>, DomainError> {
        let rows: Vec<ClassSummaryRow> = match date {
            Some(date) => sqlx::query_as(&summary_query("WHERE c.fecha = $1"))
                .bind(date)
                .fetch_all(&self.pool)
                .await,
            None => sqlx::query_as(&summary_query("")).fetch_all(&self.pool).await,
        }
        .map_err(|e| db_error("list classes", e))?;

        rows.into_iter().map(ClassSummary::try_from).collect()
    }

    async fn load_roster(&self, id: &ClassId) -> Result<Option<ClassRoster>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("acquire connection", e))?;

        let row: Option<ClassRow> =
            sqlx::query_as(&format!("SELECT {} FROM classes c WHERE c.id = $1", CLASS_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| db_error("fetch class", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let class = GymClass::try_from(row)?;
        let reservations = load_reservations(&mut conn, id).await?;
        Ok(Some(ClassRoster::new(class, reservations)))
    }

    async fn find_reservation(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            RESERVATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch reservation", e))?;

        row.map(Reservation::try_from).transpose()
    }

    async fn list_reservations_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Reservation>, DomainError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reservations WHERE member_id = $1 ORDER BY created_at DESC",
            RESERVATION_COLUMNS
        ))
        .bind(member_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list reservations", e))?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn lock(&self, class_id: &ClassId) -> Result<Option<Box<dyn RosterLease>>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let row: Option<ClassRow> = sqlx::query_as(&format!(
            "SELECT {} FROM classes c WHERE c.id = $1 FOR UPDATE",
            CLASS_COLUMNS
        ))
        .bind(class_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("lock class", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let class = GymClass::try_from(row)?;
        let reservations = load_reservations(&mut tx, class_id).await?;
        let roster = ClassRoster::new(class, reservations);

        Ok(Some(Box::new(PostgresRosterLease {
            tx,
            loaded: roster.clone(),
            roster,
        })))
    }
}
