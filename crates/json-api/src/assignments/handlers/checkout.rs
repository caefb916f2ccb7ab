//! Checkout Assignment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    assignments::{errors::into_status_error, models::CheckoutResponse},
    extensions::*,
    observability::record_status_change,
    state::State,
};

/// Checkout Assignment Handler
///
/// Tenants end their own stay. Within 24 hours of approval (or of booking, if
/// never approved) this is a cancellation, afterwards the stay completes.
#[endpoint(
    tags("assignments"),
    summary = "Check Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checked out"),
        (status_code = StatusCode::NOT_FOUND, description = "Assignment not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Assignment belongs to another tenant"),
        (status_code = StatusCode::CONFLICT, description = "Assignment is not approved or active"),
    ),
)]
pub(crate) async fn handler(
    assignment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.current_user_or_401()?;

    let receipt = state
        .app
        .assignments
        .checkout(tenant, assignment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let status = receipt.outcome.status();

    record_status_change(status);

    tracing::info!(
        assignment_uuid = %receipt.record.assignment.uuid,
        status = %status,
        "checked out"
    );

    Ok(Json(CheckoutResponse {
        outcome: status.to_string(),
        assignment: receipt.record.into(),
    }))
}
