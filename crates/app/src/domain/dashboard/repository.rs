//! Dashboard Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query, query_scalar};

use dormitory::{
    assignments::AssignmentStatus,
    dashboard::{AssignmentFacts, Overview},
    pricing::StayDates,
    rooms::RoomStatus,
};

const ROOM_OCCUPANCY_SQL: &str = include_str!("sql/room_occupancy.sql");
const ASSIGNMENT_STATUS_COUNTS_SQL: &str = include_str!("sql/assignment_status_counts.sql");
const COUNT_TENANTS_SQL: &str = include_str!("sql/count_tenants.sql");
const LIST_ASSIGNMENT_FACTS_SQL: &str = include_str!("sql/list_assignment_facts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDashboardRepository;

impl PgDashboardRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Tally rooms, assignments and tenants into an [`Overview`].
    pub(crate) async fn overview(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Overview, sqlx::Error> {
        let mut overview = Overview::default();

        let rooms = query(ROOM_OCCUPANCY_SQL)
            .try_map(|row: PgRow| {
                let status: String = row.try_get("status")?;
                let capacity: i16 = row.try_get("capacity")?;
                let occupied: i16 = row.try_get("occupied")?;

                Ok((
                    status.parse::<RoomStatus>().map_err(|e| decode_error("status", e))?,
                    u8::try_from(capacity).map_err(|e| decode_error("capacity", e))?,
                    u8::try_from(occupied).map_err(|e| decode_error("occupied", e))?,
                ))
            })
            .fetch_all(&mut **tx)
            .await?;

        for (status, capacity, occupied) in rooms {
            overview.add_room(status, capacity, occupied);
        }

        let counts = query(ASSIGNMENT_STATUS_COUNTS_SQL)
            .try_map(|row: PgRow| {
                let status: String = row.try_get("status")?;
                let total: i64 = row.try_get("total")?;

                Ok((
                    status
                        .parse::<AssignmentStatus>()
                        .map_err(|e| decode_error("status", e))?,
                    u32::try_from(total).map_err(|e| decode_error("total", e))?,
                ))
            })
            .fetch_all(&mut **tx)
            .await?;

        for (status, total) in counts {
            overview.add_assignments(status, total);
        }

        let tenants: i64 = query_scalar(COUNT_TENANTS_SQL).fetch_one(&mut **tx).await?;

        overview.tenants = u32::try_from(tenants).map_err(|e| decode_error("count", e))?;

        Ok(overview)
    }

    /// Assignments that can contribute to any series.
    pub(crate) async fn list_assignment_facts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AssignmentFacts>, sqlx::Error> {
        query(LIST_ASSIGNMENT_FACTS_SQL)
            .try_map(|row: PgRow| decode_facts(&row))
            .fetch_all(&mut **tx)
            .await
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

fn decode_facts(row: &PgRow) -> sqlx::Result<AssignmentFacts> {
    let status: String = row.try_get("status")?;
    let start = row.try_get::<SqlxDate, _>("start_date")?.to_jiff();
    let end = row.try_get::<SqlxDate, _>("end_date")?.to_jiff();

    Ok(AssignmentFacts {
        status: status
            .parse::<AssignmentStatus>()
            .map_err(|e| decode_error("status", e))?,
        total_price: row.try_get("total_price")?,
        monthly_rate: row.try_get("monthly_rate")?,
        stay: StayDates::new(start, end).map_err(|e| decode_error("end_date", e))?,
        check_in_time: row
            .try_get::<Option<SqlxTimestamp>, _>("check_in_time")?
            .map(SqlxTimestamp::to_jiff),
        approval_time: row
            .try_get::<Option<SqlxTimestamp>, _>("approval_time")?
            .map(SqlxTimestamp::to_jiff),
        check_out_time: row
            .try_get::<Option<SqlxTimestamp>, _>("check_out_time")?
            .map(SqlxTimestamp::to_jiff),
        updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
    })
}
