//! Room request and response bodies.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dormitory::rooms::{Room, RoomDetails, RoomType};

use crate::extensions::*;

/// Room Request
///
/// Shared by create and update; `maintenance` is ignored on create.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomRequest {
    /// Optional client-chosen identifier
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Room number, e.g. `A101`
    pub number: String,

    /// Floor, 1-3 digits
    pub floor: String,

    /// Places in the room, 1-6
    pub capacity: u8,

    /// `Standard`, `Single`, `Double` or `Suite`
    #[serde(rename = "type", default)]
    pub room_type: Option<String>,

    /// Monthly rate as a decimal string
    pub monthly_rate: String,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub description: String,

    /// Set or clear maintenance; absent leaves it unchanged
    #[serde(default)]
    pub maintenance: Option<bool>,
}

impl RoomRequest {
    /// Parse the textual fields into room details.
    pub(crate) fn details(&self) -> Result<RoomDetails, StatusError> {
        let room_type = match self.room_type.as_deref() {
            Some(value) => RoomType::from_str(value).or_400("Unknown room type")?,
            None => RoomType::Standard,
        };

        let monthly_rate =
            Decimal::from_str(self.monthly_rate.trim()).or_400("Invalid monthly rate")?;

        Ok(RoomDetails {
            number: self.number.clone(),
            floor: self.floor.clone(),
            capacity: self.capacity,
            room_type,
            monthly_rate,
            amenities: self.amenities.clone(),
            description: self.description.clone(),
        })
    }
}

/// Room Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomResponse {
    pub uuid: Uuid,
    pub number: String,
    pub floor: String,
    pub capacity: u8,
    pub occupied: u8,
    #[serde(rename = "type")]
    pub room_type: String,
    /// `available`, `occupied` or `maintenance`
    pub status: String,
    pub monthly_rate: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub description: String,
    /// Users currently holding a place
    pub occupants: Vec<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            uuid: room.uuid.into(),
            number: room.number,
            floor: room.floor,
            capacity: room.capacity,
            occupied: room.occupied,
            room_type: room.room_type.to_string(),
            status: room.status.to_string(),
            monthly_rate: room.monthly_rate.to_string(),
            images: room.images,
            amenities: room.amenities,
            description: room.description,
            occupants: room.occupants.into_iter().map(Into::into).collect(),
            created_at: room.created_at.to_string(),
            updated_at: room.updated_at.to_string(),
        }
    }
}

/// Public Room Response
///
/// What prospective tenants may see without logging in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublicRoomResponse {
    pub uuid: Uuid,
    pub number: String,
    pub floor: String,
    pub capacity: u8,
    /// Places still free
    pub vacancies: u8,
    #[serde(rename = "type")]
    pub room_type: String,
    pub status: String,
    pub monthly_rate: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub description: String,
}

impl From<Room> for PublicRoomResponse {
    fn from(room: Room) -> Self {
        Self {
            uuid: room.uuid.into(),
            number: room.number,
            floor: room.floor,
            capacity: room.capacity,
            vacancies: room.capacity.saturating_sub(room.occupied),
            room_type: room.room_type.to_string(),
            status: room.status.to_string(),
            monthly_rate: room.monthly_rate.to_string(),
            images: room.images,
            amenities: room.amenities,
            description: room.description,
        }
    }
}

/// Rooms Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomsResponse {
    pub rooms: Vec<RoomResponse>,
}

/// Public Rooms Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublicRoomsResponse {
    pub rooms: Vec<PublicRoomResponse>,
}
