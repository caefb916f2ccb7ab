//! Assignment Errors

use salvo::http::StatusError;
use tracing::warn;

use dormitory::assignments::TransitionError;
use dormitory_app::assignments::AssignmentsServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: AssignmentsServiceError) -> StatusError {
    match error {
        AssignmentsServiceError::NotFound => StatusError::not_found().brief("Assignment not found"),
        AssignmentsServiceError::RoomNotFound => StatusError::not_found().brief("Room not found"),
        AssignmentsServiceError::Forbidden => {
            StatusError::forbidden().brief("Assignment belongs to another tenant")
        }
        AssignmentsServiceError::RoomUnavailable
        | AssignmentsServiceError::AlreadyHasOpenAssignment
        | AssignmentsServiceError::MissingIdDocument
        | AssignmentsServiceError::InvalidState(_) => {
            StatusError::conflict().brief(error.to_string())
        }
        AssignmentsServiceError::InvalidTransition(TransitionError::UnknownStatus(status)) => {
            StatusError::bad_request().brief(format!("Unknown assignment status \"{status}\""))
        }
        AssignmentsServiceError::InvalidTransition(source) => {
            StatusError::conflict().brief(source.to_string())
        }
        AssignmentsServiceError::CapacityExceeded(source) => {
            warn!("{source}");

            StatusError::conflict().brief(source.to_string())
        }
        AssignmentsServiceError::InvalidDates(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        AssignmentsServiceError::InvalidPrice | AssignmentsServiceError::InvalidData => {
            StatusError::bad_request().brief(error.to_string())
        }
        AssignmentsServiceError::ReferenceExhausted => {
            internal_error("failed to create assignment", &error)
        }
        AssignmentsServiceError::Sql(source) => internal_error("assignment storage error", &source),
    }
}
