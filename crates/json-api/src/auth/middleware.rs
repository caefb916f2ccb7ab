//! Bearer token middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use dormitory_app::auth::{AuthServiceError, AuthenticatedUser};

use crate::{extensions::*, state::State};

/// Resolve the bearer token into the current user, or answer 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(user) => {
            let span = tracing::Span::current();

            span.record("user_uuid", tracing::field::display(user.uuid));
            span.record("role", user.role.as_str());

            depot.insert_current_user(user);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<AuthenticatedUser, StatusError> {
    let token = bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::InvalidToken
            | AuthServiceError::TokenExpired
            | AuthServiceError::NotFound => {
                StatusError::unauthorized().brief("Invalid or expired token")
            }
            other => internal_error("failed to authenticate bearer token", &other),
        })
}

/// `Authorization: Bearer <token>`, scheme matched case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
