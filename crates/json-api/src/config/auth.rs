//! Auth Config

use clap::Args;
use jiff::SignedDuration;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Bearer token lifetime in days
    #[arg(long, env = "JWT_TTL_DAYS", default_value_t = 30_u16)]
    pub jwt_ttl_days: u16,
}

impl AuthConfig {
    /// Token lifetime as a duration.
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.jwt_ttl_days) * SECONDS_PER_DAY)
    }
}
