//! Verify Registration Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{TokenResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Verify Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyRequest {
    pub email: String,

    /// Six-digit code from the verification email
    pub code: String,
}

/// Verify Registration Handler
///
/// Creates the tenant account and logs it in.
#[endpoint(
    tags("auth"),
    summary = "Verify Registration",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = state
        .app
        .auth
        .verify(&request.email, request.code.trim())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dormitory::users::{UserRole, UserUuid};
    use dormitory_app::auth::{AuthServiceError, IssuedToken, MockAuthService};

    use crate::{
        auth::handlers::tests::make_user,
        test_helpers::{TestServices, anonymous_service},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        anonymous_service(
            TestServices::new().with_auth(auth),
            Router::with_path("auth/verify").post(handler),
        )
    }

    #[tokio::test]
    async fn test_verify_success_returns_token() -> TestResult {
        let uuid = UserUuid::new();
        let mut auth = MockAuthService::new();

        auth.expect_verify()
            .once()
            .withf(|email, code| email == "ada@example.com" && code == "123456")
            .return_once(move |_, _| {
                Ok(IssuedToken {
                    token: "jwt".to_string(),
                    user: make_user(uuid, UserRole::Tenant),
                })
            });

        let mut res = TestClient::post("http://example.com/auth/verify")
            .json(&json!({ "email": "ada@example.com", "code": " 123456 " }))
            .send(&make_service(auth))
            .await;

        let body: TokenResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.token, "jwt");
        assert_eq!(body.user.uuid, uuid.into_uuid());
        assert_eq!(body.user.role, "tenant");

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_wrong_code_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_verify()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCode));

        let res = TestClient::post("http://example.com/auth/verify")
            .json(&json!({ "email": "ada@example.com", "code": "000000" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
