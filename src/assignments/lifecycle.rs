//! Status changes that keep the room in step.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    occupancy::{OccupancyError, synchronize},
    rooms::Room,
    users::UserUuid,
};

use super::{Assignment, AssignmentStatus, StatusChange, TransitionError};

/// Errors raised while changing an assignment's status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The move is not in the transition table.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The room has no place left.
    #[error(transparent)]
    Occupancy(#[from] OccupancyError),
}

/// Move `assignment` to `next` and update `room` to match.
///
/// Both values are left untouched when an error is returned. Callers must
/// pass the persisted state of both rows, ideally locked for the duration of
/// the write.
///
/// # Errors
///
/// Returns [`LifecycleError::Transition`] for moves outside the table and
/// [`LifecycleError::Occupancy`] when a place is claimed in a full room.
pub fn apply_status_change(
    assignment: &mut Assignment,
    room: &mut Room,
    next: AssignmentStatus,
    now: Timestamp,
    actor: UserUuid,
) -> Result<StatusChange, LifecycleError> {
    let previous = assignment.status;

    previous.transition_to(next)?;

    let mutation = synchronize(previous, next, room, assignment.user)?;
    let change = assignment.change_status(next, now, actor)?;

    if let Some(mutation) = mutation {
        mutation.apply_to(room);
        room.updated_at = now;
    }

    Ok(change)
}
