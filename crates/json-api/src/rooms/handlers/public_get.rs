//! Public Get Room Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, models::PublicRoomResponse},
    state::State,
};

/// Public Get Room Handler
#[endpoint(
    tags("rooms"),
    summary = "Get Room (public)",
    responses(
        (status_code = StatusCode::OK, description = "Room"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
    ),
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PublicRoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let room = state
        .app
        .rooms
        .get_room(room.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(room.into()))
}
