//! Room Assignments

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::AssignmentsServiceError;
pub use service::*;
