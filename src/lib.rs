//! Dormitory
//!
//! Domain rules for running a dormitory: room inventory, the room-assignment
//! lifecycle, occupancy bookkeeping, pricing and dashboard reporting.
//!
//! Everything in this crate is free of I/O. Persistence and transport live in
//! the `dormitory-app` and `dormitory-json` crates, which call into these
//! functions while holding the relevant database rows locked.

pub mod assignments;
pub mod dashboard;
pub mod occupancy;
pub mod prelude;
pub mod pricing;
pub mod rooms;
pub mod users;
pub mod uuids;
