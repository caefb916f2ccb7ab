//! Internal error responses.

use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use salvo::prelude::StatusError;
use tracing::error;

static EXPOSE_ERROR_DETAIL: AtomicBool = AtomicBool::new(true);

/// Whether 500 responses carry the underlying error text. Off in production.
pub(crate) fn set_expose_error_detail(expose: bool) {
    EXPOSE_ERROR_DETAIL.store(expose, Ordering::Relaxed);
}

/// Log `source` and build a 500, attaching its text outside production.
pub(crate) fn internal_error(context: &str, source: &dyn Display) -> StatusError {
    error!("{context}: {source}");

    let status = StatusError::internal_server_error();

    if EXPOSE_ERROR_DETAIL.load(Ordering::Relaxed) {
        status.detail(format!("{context}: {source}"))
    } else {
        status
    }
}
