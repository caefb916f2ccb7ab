//! Auth service errors.

use argon2::password_hash;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use dormitory::users::RegistrationError;

use crate::auth::{NotifierError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user not found")]
    NotFound,

    #[error("email already registered")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired verification code")]
    InvalidCode,

    #[error("invalid bearer token")]
    InvalidToken,

    #[error("bearer token expired")]
    TokenExpired,

    #[error(transparent)]
    Invalid(#[from] RegistrationError),

    #[error("password hashing error")]
    PasswordHash(#[source] password_hash::Error),

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error(transparent)]
    Notifier(#[from] NotifierError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            _ => Self::Sql(error),
        }
    }
}

impl From<password_hash::Error> for AuthServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::PasswordHash(error)
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Invalid(_) => Self::InvalidToken,
            other @ (TokenError::Signing(_) | TokenError::Lifetime) => Self::Token(other),
        }
    }
}
