//! Assignments Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use dormitory::{
    assignments::{Assignment, AssignmentStatus, AssignmentUuid},
    pricing::StayDates,
    rooms::{RoomType, RoomUuid},
    users::UserUuid,
};

use crate::domain::assignments::{
    data::NewAssignment,
    models::{AssignmentRecord, RoomSummary, TenantSummary},
};

const INSERT_ASSIGNMENT_SQL: &str = include_str!("sql/insert_assignment.sql");
const GET_ASSIGNMENT_RECORD_SQL: &str = include_str!("sql/get_assignment_record.sql");
const LIST_ASSIGNMENT_RECORDS_SQL: &str = include_str!("sql/list_assignment_records.sql");
const LIST_USER_ASSIGNMENT_RECORDS_SQL: &str =
    include_str!("sql/list_user_assignment_records.sql");
const LIST_ASSIGNMENT_RECORDS_BY_STATUS_SQL: &str =
    include_str!("sql/list_assignment_records_by_status.sql");
const LIST_BILLABLE_ASSIGNMENT_RECORDS_SQL: &str =
    include_str!("sql/list_billable_assignment_records.sql");
const LOCK_ASSIGNMENT_SQL: &str = include_str!("sql/lock_assignment.sql");
const HAS_OPEN_ASSIGNMENT_SQL: &str = include_str!("sql/has_open_assignment.sql");
const SAVE_ASSIGNMENT_SQL: &str = include_str!("sql/save_assignment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAssignmentsRepository;

impl PgAssignmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a pending assignment under `reference`.
    ///
    /// Returns `None` when the reference is already taken.
    pub(crate) async fn insert_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        reference: &str,
        assignment: &NewAssignment,
        id_document_path: &str,
        total_price: Decimal,
    ) -> Result<Option<AssignmentUuid>, sqlx::Error> {
        let inserted: Option<Uuid> = query_scalar(INSERT_ASSIGNMENT_SQL)
            .bind(assignment.uuid.into_uuid())
            .bind(reference)
            .bind(user.into_uuid())
            .bind(assignment.room.into_uuid())
            .bind(SqlxDate::from(assignment.stay.start()))
            .bind(SqlxDate::from(assignment.stay.end()))
            .bind(id_document_path)
            .bind(total_price)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(inserted.map(AssignmentUuid::from_uuid))
    }

    pub(crate) async fn get_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assignment: AssignmentUuid,
    ) -> Result<AssignmentRecord, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(GET_ASSIGNMENT_RECORD_SQL)
            .bind(assignment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_records(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(LIST_ASSIGNMENT_RECORDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_records(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(LIST_USER_ASSIGNMENT_RECORDS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_records_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: AssignmentStatus,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(LIST_ASSIGNMENT_RECORDS_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_billable_records(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(LIST_BILLABLE_ASSIGNMENT_RECORDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Load an assignment and hold its row lock until the transaction ends.
    pub(crate) async fn lock_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assignment: AssignmentUuid,
    ) -> Result<Assignment, sqlx::Error> {
        query(LOCK_ASSIGNMENT_SQL)
            .bind(assignment.into_uuid())
            .try_map(|row: PgRow| decode_assignment(&row))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn has_open_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(HAS_OPEN_ASSIGNMENT_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Persist lifecycle fields and notes.
    pub(crate) async fn save_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assignment: &Assignment,
    ) -> Result<(), sqlx::Error> {
        query(SAVE_ASSIGNMENT_SQL)
            .bind(assignment.uuid.into_uuid())
            .bind(assignment.status.as_str())
            .bind(assignment.notes.as_deref())
            .bind(assignment.check_in_time.map(SqlxTimestamp::from))
            .bind(assignment.check_out_time.map(SqlxTimestamp::from))
            .bind(assignment.checked_out_by.map(UserUuid::into_uuid))
            .bind(assignment.approval_time.map(SqlxTimestamp::from))
            .bind(SqlxTimestamp::from(assignment.updated_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn decode_error<E>(column: &str, error: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

fn optional_timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<jiff::Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

/// Decode the `room_assignments` columns of a row.
fn decode_assignment(row: &PgRow) -> sqlx::Result<Assignment> {
    let status: String = row.try_get("status")?;
    let start = row.try_get::<SqlxDate, _>("start_date")?.to_jiff();
    let end = row.try_get::<SqlxDate, _>("end_date")?.to_jiff();

    Ok(Assignment {
        uuid: AssignmentUuid::from_uuid(row.try_get("uuid")?),
        reference: row.try_get("reference")?,
        user: UserUuid::from_uuid(row.try_get("user_uuid")?),
        room: RoomUuid::from_uuid(row.try_get("room_uuid")?),
        stay: StayDates::new(start, end).map_err(|e| decode_error("end_date", e))?,
        id_document_path: row.try_get("id_document_path")?,
        status: status
            .parse::<AssignmentStatus>()
            .map_err(|e| decode_error("status", e))?,
        notes: row.try_get("notes")?,
        check_in_time: optional_timestamp(row, "check_in_time")?,
        check_out_time: optional_timestamp(row, "check_out_time")?,
        checked_out_by: row
            .try_get::<Option<Uuid>, _>("checked_out_by")?
            .map(UserUuid::from_uuid),
        approval_time: optional_timestamp(row, "approval_time")?,
        total_price: row.try_get("total_price")?,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
    })
}

impl<'r> FromRow<'r, PgRow> for AssignmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let assignment = decode_assignment(row)?;
        let room_type: String = row.try_get("room_type")?;

        Ok(Self {
            tenant: TenantSummary {
                uuid: assignment.user,
                name: row.try_get("tenant_name")?,
                email: row.try_get("tenant_email")?,
            },
            room: RoomSummary {
                uuid: assignment.room,
                number: row.try_get("room_number")?,
                floor: row.try_get("room_floor")?,
                room_type: room_type
                    .parse::<RoomType>()
                    .map_err(|e| decode_error("room_type", e))?,
                monthly_rate: row.try_get("room_monthly_rate")?,
            },
            assignment,
        })
    }
}
