//! Dashboard Handlers

pub(crate) mod stats;
