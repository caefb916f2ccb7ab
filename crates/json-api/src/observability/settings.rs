//! Values the request middleware reads on every request.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::observability::ObservabilityConfig;

static SLOW_REQUEST_MS: AtomicU64 = AtomicU64::new(1_000);
static PROPAGATE_PARENT: AtomicBool = AtomicBool::new(false);

pub(super) fn apply(config: &ObservabilityConfig) {
    SLOW_REQUEST_MS.store(config.slow_request_threshold_ms, Ordering::Relaxed);
    PROPAGATE_PARENT.store(config.propagates_parent(), Ordering::Relaxed);
}

pub(super) fn slow_request_ms() -> u64 {
    SLOW_REQUEST_MS.load(Ordering::Relaxed)
}

pub(super) fn propagate_parent() -> bool {
    PROPAGATE_PARENT.load(Ordering::Relaxed)
}
