//! Users

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Marker for user identifiers.
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Role a user acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Dormitory staff; manages rooms and approves bookings.
    Admin,

    /// A resident booking rooms for themselves.
    Tenant,
}

impl UserRole {
    /// Storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Tenant => "tenant",
        }
    }

    /// Whether this role may act on behalf of any user.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown user role \"{0}\"")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "tenant" => Ok(Self::Tenant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Reasons registration details are rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Name is empty or longer than 100 characters.
    #[error("name must be between 1 and 100 characters")]
    InvalidName,

    /// Email is not of the form `local@domain`.
    #[error("email address is invalid")]
    InvalidEmail,

    /// Password shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const MAX_NAME_LENGTH: usize = 100;

/// Trim and check a display name.
///
/// # Errors
///
/// Returns [`RegistrationError::InvalidName`] when the trimmed name is empty or too long.
pub fn normalize_name(name: &str) -> Result<String, RegistrationError> {
    let name = name.trim();

    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        return Err(RegistrationError::InvalidName);
    }

    Ok(name.to_string())
}

/// Lower-case and check an email address.
///
/// # Errors
///
/// Returns [`RegistrationError::InvalidEmail`] unless the address has exactly one
/// `@` with non-empty local and domain parts and no whitespace.
pub fn normalize_email(email: &str) -> Result<String, RegistrationError> {
    let email = email.trim().to_lowercase();

    let Some((local, domain)) = email.split_once('@') else {
        return Err(RegistrationError::InvalidEmail);
    };

    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err(RegistrationError::InvalidEmail);
    }

    Ok(email)
}

/// Check password strength.
///
/// # Errors
///
/// Returns [`RegistrationError::WeakPassword`] for passwords under the minimum length.
pub fn check_password(password: &str) -> Result<(), RegistrationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::WeakPassword);
    }

    Ok(())
}
