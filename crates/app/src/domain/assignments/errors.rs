//! Assignments service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use dormitory::{
    assignments::{AssignmentStatus, CheckoutError, LifecycleError, TransitionError},
    occupancy::OccupancyError,
    pricing::PricingError,
};

const ONE_OPEN_PER_USER: &str = "room_assignments_one_open_per_user";

#[derive(Debug, Error)]
pub enum AssignmentsServiceError {
    #[error("assignment not found")]
    NotFound,

    #[error("room not found")]
    RoomNotFound,

    #[error("room is not available for booking")]
    RoomUnavailable,

    #[error("tenant already has a pending, approved or active assignment")]
    AlreadyHasOpenAssignment,

    #[error("identity document is required")]
    MissingIdDocument,

    #[error("assignment belongs to another tenant")]
    Forbidden,

    #[error("assignment is {0} and cannot be checked out")]
    InvalidState(AssignmentStatus),

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error(transparent)]
    CapacityExceeded(#[from] OccupancyError),

    #[error(transparent)]
    InvalidDates(#[from] PricingError),

    #[error("total price cannot be negative")]
    InvalidPrice,

    #[error("could not allocate a unique reference number")]
    ReferenceExhausted,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AssignmentsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if error
            .as_database_error()
            .and_then(DatabaseError::constraint)
            == Some(ONE_OPEN_PER_USER)
        {
            return Self::AlreadyHasOpenAssignment;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation,
            ) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<LifecycleError> for AssignmentsServiceError {
    fn from(error: LifecycleError) -> Self {
        match error {
            LifecycleError::Transition(error) => Self::InvalidTransition(error),
            LifecycleError::Occupancy(error) => Self::CapacityExceeded(error),
        }
    }
}

impl From<CheckoutError> for AssignmentsServiceError {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::Forbidden => Self::Forbidden,
            CheckoutError::InvalidState(status) => Self::InvalidState(status),
            CheckoutError::Lifecycle(error) => error.into(),
        }
    }
}
