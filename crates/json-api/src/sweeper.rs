//! Expired registration sweeper

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use dormitory_app::auth::AuthService;

/// Remove registrations whose verification code expired before `now`.
async fn sweep_once(auth: &dyn AuthService, now: Timestamp) -> u64 {
    match auth.sweep_expired_registrations(now).await {
        Ok(0) => {
            debug!("no expired registrations");

            0
        }
        Ok(removed) => {
            info!(removed, "removed expired registrations");

            removed
        }
        Err(error) => {
            warn!("failed to sweep expired registrations: {error}");

            0
        }
    }
}

/// Sweep every `period` until the runtime shuts down.
pub(crate) fn spawn(auth: Arc<dyn AuthService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(period);

        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            sweep_once(auth.as_ref(), Timestamp::now()).await;
        }
    })
}
