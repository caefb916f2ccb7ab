//! Tenant self-service checkout.
//!
//! A checkout inside the grace period after approval (or after the booking was
//! made, if it never went through approval) is treated as a cancellation;
//! later checkouts complete the stay.

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

use crate::{rooms::Room, users::UserUuid};

use super::{Assignment, AssignmentStatus, LifecycleError, apply_status_change};

/// Length of the cancellation grace period.
pub const GRACE_PERIOD: SignedDuration = SignedDuration::from_hours(24);

/// Note appended when a checkout lands inside the grace period.
pub const GRACE_PERIOD_NOTE: &str = "Cancelled within the 24-hour grace period";

/// How a checkout ends the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Inside the grace period.
    Cancelled,
    /// After the grace period.
    Completed,
}

impl CheckoutOutcome {
    /// Outcome of checking out at `now` for a booking anchored at `anchor`.
    ///
    /// The boundary itself counts as inside the grace period.
    #[must_use]
    pub fn at(anchor: Timestamp, now: Timestamp) -> Self {
        if now.duration_since(anchor).abs() <= GRACE_PERIOD {
            Self::Cancelled
        } else {
            Self::Completed
        }
    }

    /// Status the assignment ends in.
    #[must_use]
    pub const fn status(self) -> AssignmentStatus {
        match self {
            Self::Cancelled => AssignmentStatus::Cancelled,
            Self::Completed => AssignmentStatus::Completed,
        }
    }
}

/// Errors raised by a checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Caller does not own the assignment.
    #[error("assignment belongs to another tenant")]
    Forbidden,

    /// Only approved or active assignments can be checked out.
    #[error("cannot check out an assignment that is {0}")]
    InvalidState(AssignmentStatus),

    /// Lifecycle rules refused the change.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl Assignment {
    /// Instant the grace period is measured from.
    #[must_use]
    pub fn grace_anchor(&self) -> Timestamp {
        self.approval_time.unwrap_or(self.created_at)
    }
}

/// Check `assignment` out on behalf of `caller`, releasing its place in `room`.
///
/// # Errors
///
/// Returns [`CheckoutError::Forbidden`] when `caller` is not the tenant and
/// [`CheckoutError::InvalidState`] unless the assignment is approved or active.
pub fn checkout(
    assignment: &mut Assignment,
    room: &mut Room,
    caller: UserUuid,
    now: Timestamp,
) -> Result<CheckoutOutcome, CheckoutError> {
    if assignment.user != caller {
        return Err(CheckoutError::Forbidden);
    }

    if !assignment.status.holds_occupancy() {
        return Err(CheckoutError::InvalidState(assignment.status));
    }

    let outcome = CheckoutOutcome::at(assignment.grace_anchor(), now);

    apply_status_change(assignment, room, outcome.status(), now, caller)?;

    if outcome == CheckoutOutcome::Cancelled {
        assignment.append_note(GRACE_PERIOD_NOTE);
    }

    Ok(outcome)
}
