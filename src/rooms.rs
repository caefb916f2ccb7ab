//! Rooms
//!
//! Physical room records and the rules that keep their occupancy counters and
//! status consistent.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    pricing::{MAX_AMOUNT, storable_amount},
    users::UserUuid,
    uuids::TypedUuid,
};

/// Smallest capacity a room may have.
pub const MIN_CAPACITY: u8 = 1;

/// Largest capacity a room may have.
pub const MAX_CAPACITY: u8 = 6;

const MAX_NUMBER_LENGTH: usize = 10;
const MAX_FLOOR_LENGTH: usize = 3;
const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Room UUID
pub type RoomUuid = TypedUuid<Room>;

/// Users currently occupying a room. Never longer than [`MAX_CAPACITY`].
pub type Occupants = SmallVec<[UserUuid; MAX_CAPACITY as usize]>;

/// Kind of room on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Shared room with standard fittings.
    Standard,
    /// Single-occupant room.
    Single,
    /// Two-occupant room.
    Double,
    /// Larger room with private facilities.
    Suite,
}

impl RoomType {
    /// Storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = RoomError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Standard" => Ok(Self::Standard),
            "Single" => Ok(Self::Single),
            "Double" => Ok(Self::Double),
            "Suite" => Ok(Self::Suite),
            other => Err(RoomError::UnknownType(other.to_string())),
        }
    }
}

/// Availability of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Has at least one free place.
    Available,
    /// Every place is taken.
    Occupied,
    /// Taken out of service by an admin; never derived automatically.
    Maintenance,
}

impl RoomStatus {
    /// Storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }

    /// Status implied by an occupancy count.
    #[must_use]
    pub const fn derive(occupied: u8, capacity: u8) -> Self {
        if occupied >= capacity {
            Self::Occupied
        } else {
            Self::Available
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = RoomError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(RoomError::UnknownStatus(other.to_string())),
        }
    }
}

/// Errors raised while validating room data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    /// Room number does not match the allowed pattern.
    #[error("room number must be 1-10 letters, digits or hyphens, starting with a letter or digit")]
    InvalidNumber,

    /// Floor is not a short numeric string.
    #[error("floor must be 1-3 digits")]
    InvalidFloor,

    /// Capacity outside the allowed range.
    #[error("capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}")]
    InvalidCapacity,

    /// Capacity would drop below the places already taken.
    #[error("capacity {capacity} is below current occupancy {occupied}")]
    CapacityBelowOccupancy {
        /// Requested capacity.
        capacity: u8,
        /// Places currently taken.
        occupied: u8,
    },

    /// Monthly rate is negative.
    #[error("monthly rate cannot be negative")]
    NegativeRate,

    /// Monthly rate does not fit the stored precision.
    #[error("monthly rate cannot exceed {MAX_AMOUNT}")]
    RateTooHigh,

    /// Description is too long.
    #[error("description cannot exceed {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,

    /// Unrecognised room type.
    #[error("unknown room type \"{0}\"")]
    UnknownType(String),

    /// Unrecognised room status.
    #[error("unknown room status \"{0}\"")]
    UnknownStatus(String),
}

/// Admin-editable room attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDetails {
    /// Room number, e.g. `A101`.
    pub number: String,
    /// Floor as a numeric string.
    pub floor: String,
    /// Number of places.
    pub capacity: u8,
    /// Kind of room.
    pub room_type: RoomType,
    /// Monthly rate in currency units.
    pub monthly_rate: Decimal,
    /// Amenity labels.
    pub amenities: Vec<String>,
    /// Free-text description.
    pub description: String,
}

impl RoomDetails {
    /// Validate and normalise the details.
    ///
    /// The room number is upper-cased, the rate is rounded to two decimal places
    /// and blank amenities are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first [`RoomError`] encountered.
    pub fn validate(self) -> Result<Self, RoomError> {
        let number = normalize_number(&self.number)?;
        let floor = normalize_floor(&self.floor)?;

        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(RoomError::InvalidCapacity);
        }

        if self.monthly_rate.is_sign_negative() && !self.monthly_rate.is_zero() {
            return Err(RoomError::NegativeRate);
        }

        let monthly_rate = storable_amount(self.monthly_rate).ok_or(RoomError::RateTooHigh)?;

        let description = self.description.trim().to_string();

        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(RoomError::DescriptionTooLong);
        }

        let amenities = self
            .amenities
            .iter()
            .map(|amenity| amenity.trim())
            .filter(|amenity| !amenity.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            number,
            floor,
            capacity: self.capacity,
            room_type: self.room_type,
            monthly_rate,
            amenities,
            description,
        })
    }
}

/// Room Record
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Unique room identifier.
    pub uuid: RoomUuid,
    /// Unique room number.
    pub number: String,
    /// Floor as a numeric string.
    pub floor: String,
    /// Number of places.
    pub capacity: u8,
    /// Places currently taken by approved or active assignments.
    pub occupied: u8,
    /// Kind of room.
    pub room_type: RoomType,
    /// Availability.
    pub status: RoomStatus,
    /// Monthly rate in currency units.
    pub monthly_rate: Decimal,
    /// Relative paths of uploaded images.
    pub images: Vec<String>,
    /// Amenity labels.
    pub amenities: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// Users holding a place in the room.
    pub occupants: Occupants,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl Room {
    /// Whether another occupant fits.
    #[must_use]
    pub const fn has_vacancy(&self) -> bool {
        self.occupied < self.capacity
    }

    /// Whether the room is out of service.
    #[must_use]
    pub const fn in_maintenance(&self) -> bool {
        matches!(self.status, RoomStatus::Maintenance)
    }

    /// Whether new booking requests may target this room.
    #[must_use]
    pub const fn accepts_bookings(&self) -> bool {
        matches!(self.status, RoomStatus::Available)
    }

    /// Re-derive the status from occupancy, leaving maintenance untouched.
    pub fn recompute_status(&mut self) {
        if !self.in_maintenance() {
            self.status = RoomStatus::derive(self.occupied, self.capacity);
        }
    }

    /// Apply edited details and an optional maintenance toggle.
    ///
    /// Setting `maintenance` to `Some(false)` clears a maintenance flag and
    /// re-derives the status from occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::CapacityBelowOccupancy`] when the new capacity cannot
    /// hold the current occupants.
    pub fn apply_details(
        &mut self,
        details: RoomDetails,
        maintenance: Option<bool>,
    ) -> Result<(), RoomError> {
        if details.capacity < self.occupied {
            return Err(RoomError::CapacityBelowOccupancy {
                capacity: details.capacity,
                occupied: self.occupied,
            });
        }

        self.number = details.number;
        self.floor = details.floor;
        self.capacity = details.capacity;
        self.room_type = details.room_type;
        self.monthly_rate = details.monthly_rate;
        self.amenities = details.amenities;
        self.description = details.description;

        match maintenance {
            Some(true) => self.status = RoomStatus::Maintenance,
            Some(false) => {
                self.status = RoomStatus::derive(self.occupied, self.capacity);
            }
            None => self.recompute_status(),
        }

        Ok(())
    }
}

fn normalize_number(number: &str) -> Result<String, RoomError> {
    let number = number.trim();
    let mut chars = number.chars();

    let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '-');

    if !valid_start || !valid_rest || number.len() > MAX_NUMBER_LENGTH {
        return Err(RoomError::InvalidNumber);
    }

    Ok(number.to_ascii_uppercase())
}

fn normalize_floor(floor: &str) -> Result<String, RoomError> {
    let floor = floor.trim();

    if floor.is_empty()
        || floor.len() > MAX_FLOOR_LENGTH
        || !floor.chars().all(|c| c.is_ascii_digit())
    {
        return Err(RoomError::InvalidFloor);
    }

    Ok(floor.to_string())
}
