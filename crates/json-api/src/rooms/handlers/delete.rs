//! Delete Room Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, rooms::errors::into_status_error, state::State};

/// Delete Room Handler
///
/// Only empty rooms without open assignments can be deleted.
#[endpoint(
    tags("rooms"),
    summary = "Delete Room",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Room deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
        (status_code = StatusCode::CONFLICT, description = "Room is in use"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let room = room.into_inner();

    state
        .app
        .rooms
        .delete_room(room.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(room_uuid = %room, "deleted room");

    Ok(StatusCode::NO_CONTENT)
}
