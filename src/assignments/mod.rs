//! Room assignments
//!
//! A tenant's booking of a room over a date range, and the lifecycle rules that
//! move it between statuses.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::Decimal;

use crate::{pricing::StayDates, rooms::RoomUuid, users::UserUuid, uuids::TypedUuid};

mod checkout;
mod lifecycle;
mod reference;
mod status;

pub use checkout::*;
pub use lifecycle::*;
pub use reference::*;
pub use status::*;

/// Assignment UUID
pub type AssignmentUuid = TypedUuid<Assignment>;

/// Assignment Record
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub uuid: AssignmentUuid,
    /// Human-readable reference, e.g. `REF-05012024-K3Q9ZD`.
    pub reference: String,
    /// Tenant who made the booking.
    pub user: UserUuid,
    /// Room being booked.
    pub room: RoomUuid,
    /// Requested stay.
    pub stay: StayDates,
    /// Relative path of the uploaded identity document.
    pub id_document_path: String,
    /// Lifecycle status.
    pub status: AssignmentStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// First time the assignment became active.
    pub check_in_time: Option<Timestamp>,
    /// Time the stay was completed.
    pub check_out_time: Option<Timestamp>,
    /// User who completed the stay.
    pub checked_out_by: Option<UserUuid>,
    /// First time the assignment was approved.
    pub approval_time: Option<Timestamp>,
    /// Agreed price for the whole stay.
    pub total_price: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl Assignment {
    /// Move to `next`, stamping lifecycle timestamps.
    ///
    /// Only the status fields are touched; the room must be synchronised
    /// separately (see [`apply_status_change`]).
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotAllowed`] for transitions outside the table.
    pub fn change_status(
        &mut self,
        next: AssignmentStatus,
        now: Timestamp,
        actor: UserUuid,
    ) -> Result<StatusChange, TransitionError> {
        let change = self.status.transition_to(next)?;

        if change.is_noop() {
            return Ok(change);
        }

        match next {
            AssignmentStatus::Approved if self.approval_time.is_none() => {
                self.approval_time = Some(now);
            }
            AssignmentStatus::Active if self.check_in_time.is_none() => {
                self.check_in_time = Some(now);
            }
            AssignmentStatus::Completed => {
                self.check_out_time = Some(now);
                self.checked_out_by = Some(actor);
            }
            _ => {}
        }

        self.status = next;
        self.updated_at = now;

        Ok(change)
    }

    /// First and last local day the tenant actually held the room.
    ///
    /// Falls back to the requested dates where the stay has not started or
    /// finished yet.
    pub fn stay_window(&self, tz: &TimeZone) -> (Date, Date) {
        let first = self
            .check_in_time
            .or(self.approval_time)
            .map_or(self.stay.start(), |instant| tz.to_datetime(instant).date());
        let last = self
            .check_out_time
            .map_or(self.stay.end(), |instant| tz.to_datetime(instant).date());

        (first, last)
    }

    /// Replace the notes; blank notes clear them.
    pub fn set_notes(&mut self, notes: &str) {
        let notes = notes.trim();

        self.notes = (!notes.is_empty()).then(|| notes.to_string());
    }

    /// Append a line to the notes.
    pub fn append_note(&mut self, note: &str) {
        self.notes = Some(match self.notes.take() {
            Some(existing) if !existing.is_empty() => format!("{existing}\n{note}"),
            _ => note.to_string(),
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::{SignedDuration, civil::date};
    use testresult::TestResult;

    use super::*;

    pub(crate) fn assignment(status: AssignmentStatus, room: RoomUuid) -> Assignment {
        let created_at: Timestamp = "2024-01-01T08:00:00Z".parse().expect("valid timestamp");

        Assignment {
            uuid: AssignmentUuid::new(),
            reference: "REF-01012024-ABC123".to_string(),
            user: UserUuid::new(),
            room,
            stay: StayDates::new(date(2024, 1, 1), date(2024, 1, 11)).expect("valid stay"),
            id_document_path: "uploads/ids/doc.png".to_string(),
            status,
            notes: None,
            check_in_time: None,
            check_out_time: None,
            checked_out_by: None,
            approval_time: None,
            total_price: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn approval_time_is_stamped_once() -> TestResult {
        let mut assignment = assignment(AssignmentStatus::Pending, RoomUuid::new());
        let admin = UserUuid::new();
        let first = assignment.created_at + SignedDuration::from_hours(1);
        let later = first + SignedDuration::from_hours(5);

        assignment.change_status(AssignmentStatus::Approved, first, admin)?;
        assignment.change_status(AssignmentStatus::Approved, later, admin)?;

        assert_eq!(assignment.approval_time, Some(first));

        Ok(())
    }

    #[test]
    fn check_in_time_is_stamped_on_first_activation() -> TestResult {
        let mut assignment = assignment(AssignmentStatus::Approved, RoomUuid::new());
        let now = assignment.created_at + SignedDuration::from_hours(2);

        assignment.change_status(AssignmentStatus::Active, now, UserUuid::new())?;

        assert_eq!(assignment.check_in_time, Some(now));
        assert_eq!(assignment.approval_time, None);

        Ok(())
    }

    #[test]
    fn completion_records_who_checked_out() -> TestResult {
        let mut assignment = assignment(AssignmentStatus::Active, RoomUuid::new());
        let actor = UserUuid::new();
        let now = assignment.created_at + SignedDuration::from_hours(48);

        assignment.change_status(AssignmentStatus::Completed, now, actor)?;

        assert_eq!(assignment.check_out_time, Some(now));
        assert_eq!(assignment.checked_out_by, Some(actor));

        Ok(())
    }

    #[test]
    fn rejection_does_not_stamp_checkout() -> TestResult {
        let mut assignment = assignment(AssignmentStatus::Approved, RoomUuid::new());

        assignment.change_status(AssignmentStatus::Rejected, Timestamp::now(), UserUuid::new())?;

        assert_eq!(assignment.check_out_time, None);
        assert_eq!(assignment.checked_out_by, None);

        Ok(())
    }

    #[test]
    fn stay_window_prefers_recorded_times() -> TestResult {
        let mut assignment = assignment(AssignmentStatus::Completed, RoomUuid::new());

        assert_eq!(
            assignment.stay_window(&TimeZone::UTC),
            (date(2024, 1, 1), date(2024, 1, 11))
        );

        assignment.approval_time = Some("2024-01-02T09:00:00Z".parse()?);
        assignment.check_out_time = Some("2024-01-20T09:00:00Z".parse()?);

        assert_eq!(
            assignment.stay_window(&TimeZone::UTC),
            (date(2024, 1, 2), date(2024, 1, 20))
        );

        Ok(())
    }

    #[test]
    fn notes_append_on_new_lines() {
        let mut assignment = assignment(AssignmentStatus::Pending, RoomUuid::new());

        assignment.set_notes("  first  ");
        assignment.append_note("second");

        assert_eq!(assignment.notes.as_deref(), Some("first\nsecond"));

        assignment.set_notes("   ");

        assert_eq!(assignment.notes, None);
    }
}
