//! Sweeper Config

use std::time::Duration;

use clap::Args;

/// Expired registration cleanup settings.
#[derive(Debug, Args)]
pub struct SweeperConfig {
    /// Seconds between expired registration sweeps
    #[arg(long, env = "REGISTRATION_SWEEP_INTERVAL_SECS", default_value_t = 300_u64)]
    pub registration_sweep_interval_secs: u64,
}

impl SweeperConfig {
    /// Sweep period, never shorter than one second.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.registration_sweep_interval_secs.max(1))
    }
}
