//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use dormitory_app::auth::NewRegistration;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewRegistration {
    fn from(request: RegisterRequest) -> Self {
        NewRegistration {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Registration Started Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistrationResponse {
    /// Address the verification code was sent to
    pub email: String,

    /// When the verification code stops working
    pub expires_at: String,
}

/// Register Handler
///
/// Starts a tenant sign-up and sends a verification code.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Verification code sent"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let receipt = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::ACCEPTED);

    Ok(Json(RegistrationResponse {
        email: receipt.email,
        expires_at: receipt.expires_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dormitory::users::RegistrationError;
    use dormitory_app::auth::{AuthServiceError, MockAuthService, RegistrationReceipt};

    use crate::test_helpers::{TestServices, anonymous_service};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        anonymous_service(
            TestServices::new().with_auth(auth),
            Router::with_path("auth/register").post(handler),
        )
    }

    #[tokio::test]
    async fn test_register_success_returns_202() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| {
                *registration
                    == NewRegistration {
                        name: "Ada".to_string(),
                        email: "Ada@Example.com".to_string(),
                        password: "correct horse".to_string(),
                    }
            })
            .return_once(|_| {
                Ok(RegistrationReceipt {
                    email: "ada@example.com".to_string(),
                    expires_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Ada",
                "email": "Ada@Example.com",
                "password": "correct horse",
            }))
            .send(&make_service(auth))
            .await;

        let body: RegistrationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::ACCEPTED));
        assert_eq!(body.email, "ada@example.com");
        assert_eq!(body.expires_at, Timestamp::UNIX_EPOCH.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_taken_email_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "12345678" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_weak_password_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::Invalid(RegistrationError::WeakPassword)));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_missing_fields_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "email": "ada@example.com" }))
            .send(&make_service(MockAuthService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
