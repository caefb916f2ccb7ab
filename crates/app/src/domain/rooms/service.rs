//! Rooms service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use dormitory::rooms::{Room, RoomUuid};

use crate::{
    database::Db,
    domain::rooms::{
        data::{NewRoom, RoomUpdate},
        errors::RoomsServiceError,
        repository::PgRoomsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgRoomsService {
    db: Db,
    repository: PgRoomsRepository,
}

impl PgRoomsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRoomsRepository::new(),
        }
    }
}

#[async_trait]
impl RoomsService for PgRoomsService {
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rooms = self.repository.list_rooms(&mut tx).await?;

        tx.commit().await?;

        Ok(rooms)
    }

    async fn list_available_rooms(&self) -> Result<Vec<Room>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rooms = self.repository.list_available_rooms(&mut tx).await?;

        tx.commit().await?;

        Ok(rooms)
    }

    async fn get_room(&self, room: RoomUuid) -> Result<Room, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let room = self.repository.get_room(&mut tx, room).await?;

        tx.commit().await?;

        Ok(room)
    }

    async fn create_room(&self, room: NewRoom) -> Result<Room, RoomsServiceError> {
        let details = room.details.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_room(&mut tx, room.uuid, &details)
            .await?;

        tx.commit().await?;

        info!(room = %created.uuid, number = %created.number, "room created");

        Ok(created)
    }

    async fn update_room(
        &self,
        room: RoomUuid,
        update: RoomUpdate,
    ) -> Result<Room, RoomsServiceError> {
        let details = update.details.validate()?;

        let mut tx = self.db.begin().await?;

        let mut locked = self.repository.lock_room(&mut tx, room).await?;

        locked.apply_details(details, update.maintenance)?;

        let updated = self.repository.update_room(&mut tx, &locked).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_room(&self, room: RoomUuid) -> Result<(), RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.repository.lock_room(&mut tx, room).await?;

        if locked.occupied > 0 || self.repository.count_open_assignments(&mut tx, room).await? > 0
        {
            return Err(RoomsServiceError::InUse);
        }

        let rows_affected = self.repository.delete_room(&mut tx, room).await?;

        if rows_affected == 0 {
            return Err(RoomsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(room = %room, "room deleted");

        Ok(())
    }

    async fn add_image(&self, room: RoomUuid, path: &str) -> Result<Room, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.add_room_image(&mut tx, room, path).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait RoomsService: Send + Sync {
    /// Retrieves all rooms.
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsServiceError>;

    /// Retrieves rooms currently open for booking.
    async fn list_available_rooms(&self) -> Result<Vec<Room>, RoomsServiceError>;

    /// Retrieve a single room.
    async fn get_room(&self, room: RoomUuid) -> Result<Room, RoomsServiceError>;

    /// Creates a new, empty room.
    async fn create_room(&self, room: NewRoom) -> Result<Room, RoomsServiceError>;

    /// Replace a room's details, optionally toggling maintenance.
    async fn update_room(
        &self,
        room: RoomUuid,
        update: RoomUpdate,
    ) -> Result<Room, RoomsServiceError>;

    /// Deletes an empty room with no open assignments.
    async fn delete_room(&self, room: RoomUuid) -> Result<(), RoomsServiceError>;

    /// Append an uploaded image path.
    async fn add_image(&self, room: RoomUuid, path: &str) -> Result<Room, RoomsServiceError>;
}
