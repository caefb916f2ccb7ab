//! Pricing
//!
//! Stay length and price estimation. A stay's length is the whole number of
//! calendar days between its start and end dates; a same-day stay is zero
//! days long. The same rule feeds price estimates, dashboard fallbacks and
//! printed transaction durations.

use jiff::civil::Date;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Days a monthly rate is spread over.
pub const DAYS_PER_MONTH: u32 = 30;

/// Largest amount a stored rate or price can hold (twelve digits, two of
/// them after the point).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

const SECONDS_PER_DAY: i64 = 86_400;

/// Errors raised while pricing a stay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// End date falls before the start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start.
        start: Date,
        /// Requested end.
        end: Date,
    },

    /// Price does not fit in a decimal or exceeds [`MAX_AMOUNT`].
    #[error("price calculation overflowed")]
    Overflow,
}

/// Whole calendar days between two dates, in either order.
#[must_use]
pub fn days_between(start: Date, end: Date) -> i64 {
    end.duration_since(start).as_secs().abs() / SECONDS_PER_DAY
}

/// Round an amount to cents, or `None` if it is negative or above
/// [`MAX_AMOUNT`].
#[must_use]
pub fn storable_amount(amount: Decimal) -> Option<Decimal> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    (!rounded.is_sign_negative() || rounded.is_zero())
        .then_some(rounded)
        .filter(|rounded| *rounded <= MAX_AMOUNT)
}

/// Requested start and end dates of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    start: Date,
    end: Date,
}

impl StayDates {
    /// Build a date range, rejecting inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::EndBeforeStart`] when `end` precedes `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, PricingError> {
        if end < start {
            return Err(PricingError::EndBeforeStart { start, end });
        }

        Ok(Self { start, end })
    }

    /// First day of the stay.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the stay.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whole days between start and end.
    #[must_use]
    pub fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }
}

/// Estimate the price of a stay from a monthly rate, rounded to a whole
/// currency unit (halves round up).
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows or the
/// total exceeds [`MAX_AMOUNT`].
pub fn estimate_total(monthly_rate: Decimal, stay: &StayDates) -> Result<Decimal, PricingError> {
    let total = monthly_rate
        .checked_mul(Decimal::from(stay.days()))
        .ok_or(PricingError::Overflow)?
        .checked_div(Decimal::from(DAYS_PER_MONTH))
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if total > MAX_AMOUNT {
        return Err(PricingError::Overflow);
    }

    Ok(total)
}
