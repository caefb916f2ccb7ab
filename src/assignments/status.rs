//! Assignment status and the transition table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::occupancy::OccupancyEffect;

/// Where an assignment is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Requested by a tenant, awaiting an admin decision.
    Pending,
    /// Accepted by an admin; the tenant holds a place.
    Approved,
    /// Declined by an admin.
    Rejected,
    /// Tenant has moved in.
    Active,
    /// Stay finished after the grace period.
    Completed,
    /// Withdrawn, e.g. checked out within the grace period.
    Cancelled,
}

/// Every status, in lifecycle order.
pub const ALL_STATUSES: [AssignmentStatus; 6] = [
    AssignmentStatus::Pending,
    AssignmentStatus::Approved,
    AssignmentStatus::Rejected,
    AssignmentStatus::Active,
    AssignmentStatus::Completed,
    AssignmentStatus::Cancelled,
];

impl AssignmentStatus {
    /// Storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses that count towards a room's occupancy.
    #[must_use]
    pub const fn holds_occupancy(self) -> bool {
        matches!(self, Self::Approved | Self::Active)
    }

    /// Statuses that block the tenant from requesting another room.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::Active)
    }

    /// Statuses an assignment never leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Statuses that count as revenue on the dashboard.
    #[must_use]
    pub const fn is_billable(self) -> bool {
        matches!(self, Self::Approved | Self::Active | Self::Completed)
    }

    /// Whether `next` is reachable from `self` in one step.
    ///
    /// Re-saving the current status is always allowed and has no effect.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use AssignmentStatus::{Active, Approved, Cancelled, Completed, Pending, Rejected};

        if self as u8 == next as u8 {
            return true;
        }

        if self.is_terminal() {
            return false;
        }

        matches!(
            (self, next),
            (Pending, Approved | Active | Rejected | Cancelled)
                | (Approved, Active | Completed | Rejected | Cancelled)
                | (Active, Completed | Rejected | Cancelled)
        )
    }

    /// Validate a transition and work out its effect on the room.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotAllowed`] for transitions outside the table.
    pub fn transition_to(self, next: Self) -> Result<StatusChange, TransitionError> {
        if !self.can_transition_to(next) {
            return Err(TransitionError::NotAllowed {
                from: self,
                to: next,
            });
        }

        Ok(StatusChange {
            previous: self,
            next,
            effect: OccupancyEffect::between(self, next),
        })
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ALL_STATUSES
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| TransitionError::UnknownStatus(value.to_string()))
    }
}

/// A validated status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Persisted status before the change.
    pub previous: AssignmentStatus,
    /// Status being written.
    pub next: AssignmentStatus,
    /// What the change does to the room's occupancy.
    pub effect: OccupancyEffect,
}

impl StatusChange {
    /// Whether the status actually changes value.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous == self.next
    }
}

/// Errors raised by the transition table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The transition is not in the table.
    #[error("cannot move an assignment from {from} to {to}")]
    NotAllowed {
        /// Current status.
        from: AssignmentStatus,
        /// Requested status.
        to: AssignmentStatus,
    },

    /// Unrecognised status string.
    #[error("unknown assignment status \"{0}\"")]
    UnknownStatus(String),
}
