//! User Models

use jiff::Timestamp;

use dormitory::users::{UserRole, UserUuid};

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Caller identity resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub role: UserRole,
}

impl AuthenticatedUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.uuid,
            role: user.role,
        }
    }
}

/// A user together with their stored password hash.
#[derive(Clone)]
pub(crate) struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// New User Data
#[derive(Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Unverified sign-up awaiting its emailed code.
#[derive(Clone)]
pub(crate) struct PendingRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub code_hash: String,
    pub expires_at: Timestamp,
}
