//! Dashboard Config

use clap::Args;
use jiff::tz::TimeZone;

/// Reporting settings.
#[derive(Debug, Args)]
pub struct DashboardConfig {
    /// IANA time zone used for report buckets and reference dates
    #[arg(long, env = "DASHBOARD_TIMEZONE", default_value = "UTC")]
    pub dashboard_timezone: String,
}

impl DashboardConfig {
    /// Resolve the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is not in the time zone database.
    pub fn time_zone(&self) -> Result<TimeZone, jiff::Error> {
        TimeZone::get(&self.dashboard_timezone)
    }
}
