//! Rooms Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query, query_scalar};
use uuid::Uuid;

use dormitory::rooms::{Room, RoomDetails, RoomStatus, RoomType, RoomUuid};
use dormitory::users::UserUuid;

const LIST_ROOMS_SQL: &str = include_str!("sql/list_rooms.sql");
const LIST_AVAILABLE_ROOMS_SQL: &str = include_str!("sql/list_available_rooms.sql");
const GET_ROOM_SQL: &str = include_str!("sql/get_room.sql");
const LOCK_ROOM_SQL: &str = include_str!("sql/lock_room.sql");
const CREATE_ROOM_SQL: &str = include_str!("sql/create_room.sql");
const UPDATE_ROOM_SQL: &str = include_str!("sql/update_room.sql");
const SAVE_OCCUPANCY_SQL: &str = include_str!("sql/save_occupancy.sql");
const ADD_ROOM_IMAGE_SQL: &str = include_str!("sql/add_room_image.sql");
const DELETE_ROOM_SQL: &str = include_str!("sql/delete_room.sql");
const COUNT_OPEN_ASSIGNMENTS_SQL: &str = include_str!("sql/count_open_assignments.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRoomsRepository;

impl PgRoomsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Room>, sqlx::Error> {
        query(LIST_ROOMS_SQL)
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_available_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Room>, sqlx::Error> {
        query(LIST_AVAILABLE_ROOMS_SQL)
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<Room, sqlx::Error> {
        query(GET_ROOM_SQL)
            .bind(room.into_uuid())
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_one(&mut **tx)
            .await
    }

    /// Load a room and hold its row lock until the transaction ends.
    pub(crate) async fn lock_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<Room, sqlx::Error> {
        query(LOCK_ROOM_SQL)
            .bind(room.into_uuid())
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        details: &RoomDetails,
    ) -> Result<Room, sqlx::Error> {
        query(CREATE_ROOM_SQL)
            .bind(room.into_uuid())
            .bind(&details.number)
            .bind(&details.floor)
            .bind(i16::from(details.capacity))
            .bind(details.room_type.as_str())
            .bind(details.monthly_rate)
            .bind(&details.amenities)
            .bind(&details.description)
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_one(&mut **tx)
            .await
    }

    /// Persist edited details and status.
    pub(crate) async fn update_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: &Room,
    ) -> Result<Room, sqlx::Error> {
        query(UPDATE_ROOM_SQL)
            .bind(room.uuid.into_uuid())
            .bind(&room.number)
            .bind(&room.floor)
            .bind(i16::from(room.capacity))
            .bind(room.room_type.as_str())
            .bind(room.status.as_str())
            .bind(room.monthly_rate)
            .bind(&room.amenities)
            .bind(&room.description)
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_one(&mut **tx)
            .await
    }

    /// Persist occupancy counters, occupants and status.
    pub(crate) async fn save_occupancy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: &Room,
    ) -> Result<(), sqlx::Error> {
        let occupants: Vec<Uuid> = room
            .occupants
            .iter()
            .map(|occupant| occupant.into_uuid())
            .collect();

        query(SAVE_OCCUPANCY_SQL)
            .bind(room.uuid.into_uuid())
            .bind(i16::from(room.occupied))
            .bind(room.status.as_str())
            .bind(occupants)
            .bind(SqlxTimestamp::from(room.updated_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn add_room_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        path: &str,
    ) -> Result<Room, sqlx::Error> {
        query(ADD_ROOM_IMAGE_SQL)
            .bind(room.into_uuid())
            .bind(path)
            .try_map(|row: PgRow| decode_room(&row))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_open_assignments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_OPEN_ASSIGNMENTS_SQL)
            .bind(room.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ROOM_SQL)
            .bind(room.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
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

fn decode_small(row: &PgRow, column: &str) -> sqlx::Result<u8> {
    let value: i16 = row.try_get(column)?;

    u8::try_from(value).map_err(|e| decode_error(column, e))
}

/// Decode a `rooms` row selected with the full column list.
pub(crate) fn decode_room(row: &PgRow) -> sqlx::Result<Room> {
    let room_type: String = row.try_get("room_type")?;
    let status: String = row.try_get("status")?;
    let occupants: Vec<Uuid> = row.try_get("occupant_uuids")?;

    Ok(Room {
        uuid: RoomUuid::from_uuid(row.try_get("uuid")?),
        number: row.try_get("number")?,
        floor: row.try_get("floor")?,
        capacity: decode_small(row, "capacity")?,
        occupied: decode_small(row, "occupied")?,
        room_type: room_type
            .parse::<RoomType>()
            .map_err(|e| decode_error("room_type", e))?,
        status: status
            .parse::<RoomStatus>()
            .map_err(|e| decode_error("status", e))?,
        monthly_rate: row.try_get("monthly_rate")?,
        images: row.try_get("images")?,
        amenities: row.try_get("amenities")?,
        description: row.try_get("description")?,
        occupants: occupants.into_iter().map(UserUuid::from_uuid).collect(),
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
    })
}
