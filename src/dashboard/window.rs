//! Reporting windows.

use jiff::{Span, civil::Date};

use super::DashboardError;

/// Month and year a dashboard reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    month: Date,
    year: i16,
}

impl ReportWindow {
    /// Window shifted from `today` by whole months and years.
    ///
    /// An offset of zero reports on the current month or year; negative
    /// offsets look back.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::WindowOutOfRange`] when an offset leaves the
    /// supported calendar.
    pub fn relative_to(
        today: Date,
        month_offset: i32,
        year_offset: i32,
    ) -> Result<Self, DashboardError> {
        let month = Span::new()
            .try_months(month_offset)
            .and_then(|span| today.first_of_month().checked_add(span))
            .map_err(|_err| DashboardError::WindowOutOfRange)?;

        let year = i16::try_from(year_offset)
            .ok()
            .and_then(|offset| today.year().checked_add(offset))
            .filter(|year| Date::new(*year, 1, 1).is_ok())
            .ok_or(DashboardError::WindowOutOfRange)?;

        Ok(Self { month, year })
    }

    /// First day of the reported month.
    #[must_use]
    pub const fn month_start(&self) -> Date {
        self.month
    }

    /// Reported year.
    #[must_use]
    pub const fn year(&self) -> i16 {
        self.year
    }

    /// Days in the reported month.
    #[must_use]
    pub fn days_in_month(&self) -> usize {
        usize::try_from(self.month.days_in_month()).unwrap_or_default()
    }

    /// Monthly bucket for `date`, if it falls in the reported month.
    pub(crate) fn day_index(&self, date: Date) -> Option<usize> {
        (date.year() == self.month.year() && date.month() == self.month.month())
            .then(|| usize::try_from(date.day() - 1).ok())
            .flatten()
    }

    /// Yearly bucket for `date`, if it falls in the reported year.
    pub(crate) fn month_index(&self, date: Date) -> Option<usize> {
        (date.year() == self.year)
            .then(|| usize::try_from(date.month() - 1).ok())
            .flatten()
    }
}
