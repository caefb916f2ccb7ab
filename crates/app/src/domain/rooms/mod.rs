//! Rooms

pub mod data;
pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use dormitory::rooms::{Room, RoomDetails, RoomStatus, RoomType, RoomUuid};
pub use errors::RoomsServiceError;
pub use service::*;
