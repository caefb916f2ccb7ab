//! Pending Assignments Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    assignments::{errors::into_status_error, models::AssignmentsResponse},
    extensions::*,
    state::State,
};

/// Pending Assignments Handler
#[endpoint(
    tags("assignments"),
    summary = "List Pending Assignments",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Assignments awaiting a decision"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AssignmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let records = state
        .app
        .assignments
        .list_pending_assignments()
        .await
        .map_err(into_status_error)?;

    Ok(Json(records.into()))
}
