//! Rooms service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use dormitory::rooms::RoomError;

#[derive(Debug, Error)]
pub enum RoomsServiceError {
    #[error("room number already in use")]
    AlreadyExists,

    #[error("room not found")]
    NotFound,

    #[error("room is occupied or has open assignments")]
    InUse,

    #[error(transparent)]
    Invalid(#[from] RoomError),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RoomsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InUse,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
