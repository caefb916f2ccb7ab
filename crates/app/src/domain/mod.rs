//! Dormitory Domain Concerns

pub mod assignments;
pub mod dashboard;
pub mod rooms;
pub mod users;
