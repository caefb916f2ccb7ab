//! Rooms Data

use dormitory::rooms::{RoomDetails, RoomUuid};

/// New Room Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub uuid: RoomUuid,
    pub details: RoomDetails,
}

/// Room Update Data
///
/// `maintenance` of `None` leaves the maintenance flag as it is.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomUpdate {
    pub details: RoomDetails,
    pub maintenance: Option<bool>,
}
