//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Current User Handler
///
/// Returns the authenticated user.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;

    let user = state
        .app
        .auth
        .get_user(current.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
