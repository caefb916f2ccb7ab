//! Auth Errors

use salvo::http::StatusError;

use dormitory_app::auth::AuthServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::EmailTaken => {
            StatusError::conflict().brief("Email address is already registered")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::InvalidCode => {
            StatusError::bad_request().brief("Invalid or expired verification code")
        }
        AuthServiceError::InvalidToken | AuthServiceError::TokenExpired => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        AuthServiceError::PasswordHash(source) => internal_error("failed to hash password", &source),
        AuthServiceError::Token(source) => internal_error("failed to issue token", &source),
        AuthServiceError::Notifier(source) => {
            internal_error("failed to send verification code", &source)
        }
        AuthServiceError::Sql(source) => internal_error("auth storage error", &source),
    }
}

#[cfg(test)]
mod tests {
    use dormitory::users::RegistrationError;
    use dormitory_app::auth::TokenError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn client_errors() {
        let cases = [
            (AuthServiceError::EmailTaken, StatusCode::CONFLICT),
            (AuthServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthServiceError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthServiceError::InvalidCode, StatusCode::BAD_REQUEST),
            (
                AuthServiceError::Invalid(RegistrationError::WeakPassword),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            let label = error.to_string();

            assert_eq!(into_status_error(error).code, expected, "{label}");
        }
    }

    #[test]
    fn token_failures_are_internal() {
        let status = into_status_error(AuthServiceError::Token(TokenError::Lifetime));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
