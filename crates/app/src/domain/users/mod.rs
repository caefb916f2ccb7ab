//! Users and pending registrations

pub mod models;
pub(crate) mod repository;

pub use models::*;
