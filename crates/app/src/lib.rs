//! Persistence, services and authentication for the dormitory backend.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

pub use domain::{assignments, dashboard, rooms, users};

#[cfg(test)]
mod test;
