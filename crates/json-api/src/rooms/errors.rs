//! Room Errors

use salvo::http::StatusError;

use dormitory_app::rooms::RoomsServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: RoomsServiceError) -> StatusError {
    match error {
        RoomsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Room number already in use")
        }
        RoomsServiceError::NotFound => StatusError::not_found().brief("Room not found"),
        RoomsServiceError::InUse => {
            StatusError::conflict().brief("Room is occupied or has open assignments")
        }
        RoomsServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        RoomsServiceError::InvalidData => StatusError::bad_request().brief("Invalid room payload"),
        RoomsServiceError::Sql(source) => internal_error("room storage error", &source),
    }
}
