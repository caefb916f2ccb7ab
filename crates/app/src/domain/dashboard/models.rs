//! Dashboard Models

use jiff::civil::Date;

use dormitory::dashboard::{DashboardSeries, Overview};

/// Headline figures and activity series for one reporting window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub overview: Overview,
    /// First day of the reported month.
    pub month: Date,
    /// Reported calendar year.
    pub year: i16,
    pub series: DashboardSeries,
}
