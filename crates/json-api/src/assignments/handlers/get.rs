//! Get Assignment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    assignments::{errors::into_status_error, models::AssignmentResponse},
    extensions::*,
    state::State,
};

/// Get Assignment Handler
#[endpoint(
    tags("assignments"),
    summary = "Get Assignment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Assignment"),
        (status_code = StatusCode::NOT_FOUND, description = "Assignment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    assignment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AssignmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let viewer = depot.current_user_or_401()?;

    let record = state
        .app
        .assignments
        .get_assignment(viewer, assignment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
