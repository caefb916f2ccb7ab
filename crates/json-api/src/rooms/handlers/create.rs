//! Create Room Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use dormitory::rooms::RoomUuid;
use dormitory_app::rooms::data::NewRoom;

use crate::{
    extensions::*,
    rooms::{
        errors::into_status_error,
        models::{RoomRequest, RoomResponse},
    },
    state::State,
};

/// Create Room Handler
#[endpoint(
    tags("rooms"),
    summary = "Create Room",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Room created"),
        (status_code = StatusCode::CONFLICT, description = "Room number already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RoomRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let request = json.into_inner();

    let new_room = NewRoom {
        uuid: request.uuid.map_or_else(RoomUuid::new, RoomUuid::from),
        details: request.details()?,
    };

    let room = state
        .app
        .rooms
        .create_room(new_room)
        .await
        .map_err(into_status_error)?;

    tracing::info!(room_uuid = %room.uuid, number = %room.number, "created room");

    res.add_header(LOCATION, format!("/rooms/{}", room.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(room.into()))
}
