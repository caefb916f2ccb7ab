//! Dashboard

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::DashboardServiceError;
pub use service::*;
