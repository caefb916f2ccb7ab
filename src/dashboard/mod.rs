//! Dashboard
//!
//! Read-only reporting over assignments: income and check-in, check-out and
//! cancellation counts bucketed by day of a month and by month of a year,
//! plus headline [`Overview`] figures.

use jiff::{
    Timestamp,
    civil::{Date, date},
    tz::TimeZone,
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    assignments::AssignmentStatus,
    pricing::{PricingError, StayDates, estimate_total},
};

mod overview;
mod series;
mod transactions;
mod window;

pub use overview::*;
pub use series::*;
pub use transactions::*;
pub use window::*;

/// Errors raised while building a dashboard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// The requested offsets fall outside the supported calendar.
    #[error("report window is out of range")]
    WindowOutOfRange,

    /// Filter ends before it starts.
    #[error("date range ends before it starts")]
    InvertedRange,

    /// An estimated income could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// What the dashboard needs to know about one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentFacts {
    /// Current status.
    pub status: AssignmentStatus,
    /// Agreed price, if recorded.
    pub total_price: Option<Decimal>,
    /// Monthly rate of the booked room, used when no price was recorded.
    pub monthly_rate: Decimal,
    /// Requested stay.
    pub stay: StayDates,
    /// First activation.
    pub check_in_time: Option<Timestamp>,
    /// First approval.
    pub approval_time: Option<Timestamp>,
    /// Completion.
    pub check_out_time: Option<Timestamp>,
    /// Last update.
    pub updated_at: Timestamp,
}

impl AssignmentFacts {
    /// Local date the stay counts as starting on.
    ///
    /// Falls back from check-in to approval to the requested start date.
    pub fn check_in_date(&self, tz: &TimeZone) -> Date {
        self.check_in_time
            .or(self.approval_time)
            .map_or(self.stay.start(), |instant| local_date(instant, tz))
    }

    /// Income attributed to the assignment.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if an estimate does not fit.
    pub fn income(&self) -> Result<Decimal, PricingError> {
        match self.total_price {
            Some(price) => Ok(price),
            None => estimate_total(self.monthly_rate, &self.stay),
        }
    }
}

/// Monthly and yearly series for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSeries {
    /// One bucket per day of the reported month.
    pub monthly: Series,
    /// One bucket per month of the reported year.
    pub yearly: Series,
}

/// Bucket `facts` into the month and year of `window`, using dates local to `tz`.
///
/// # Errors
///
/// Returns [`DashboardError::Pricing`] if an income estimate overflows.
pub fn aggregate<'a>(
    facts: impl IntoIterator<Item = &'a AssignmentFacts>,
    window: &ReportWindow,
    tz: &TimeZone,
) -> Result<DashboardSeries, DashboardError> {
    let mut monthly = Series::labelled((1..=window.days_in_month()).map(|day| day.to_string()));
    let mut yearly = Series::labelled(
        (1..=12_i8).map(|month| date(window.year(), month, 1).strftime("%b").to_string()),
    );

    for fact in facts {
        if fact.status.is_billable() {
            let income = fact.income()?;

            record(&mut monthly, &mut yearly, window, fact.check_in_date(tz), |bucket| {
                bucket.income += income;
                bucket.check_ins += 1;
            });
        }

        if let (AssignmentStatus::Completed, Some(check_out)) = (fact.status, fact.check_out_time) {
            record(&mut monthly, &mut yearly, window, local_date(check_out, tz), |bucket| {
                bucket.check_outs += 1;
            });
        }

        if fact.status == AssignmentStatus::Cancelled {
            record(&mut monthly, &mut yearly, window, local_date(fact.updated_at, tz), |bucket| {
                bucket.cancellations += 1;
            });
        }
    }

    Ok(DashboardSeries { monthly, yearly })
}

fn record(
    monthly: &mut Series,
    yearly: &mut Series,
    window: &ReportWindow,
    day: Date,
    update: impl Fn(&mut Bucket),
) {
    if let Some(bucket) = monthly.bucket_mut(window.day_index(day)) {
        update(bucket);
    }

    if let Some(bucket) = yearly.bucket_mut(window.month_index(day)) {
        update(bucket);
    }
}

fn local_date(instant: Timestamp, tz: &TimeZone) -> Date {
    tz.to_datetime(instant).date()
}
