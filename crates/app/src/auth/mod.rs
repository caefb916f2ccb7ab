//! Authentication

mod codes;
mod errors;
mod jwt;
mod notifier;
mod password;
mod service;

pub use errors::*;
pub use jwt::*;
pub use notifier::*;
pub use service::*;

pub use crate::domain::users::{AuthenticatedUser, User};
