//! Room Assignments

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
