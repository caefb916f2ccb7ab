//! Room Image Upload Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, models::RoomResponse},
    state::State,
    uploads::{self, UploadKind},
};

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

/// Room Image Upload Handler
///
/// Accepts a multipart `image` (JPEG, PNG or WebP) and appends it to the room.
#[endpoint(
    tags("rooms"),
    summary = "Upload Room Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Image added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or unsupported image"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let room = room.into_inner();

    let Some(file) = req.file(IMAGE_FIELD).await else {
        return Err(StatusError::bad_request().brief("An image file is required"));
    };

    let path = state
        .uploads
        .store(UploadKind::RoomImage, file)
        .await
        .map_err(uploads::into_status_error)?;

    let room = match state.app.rooms.add_image(room.into(), &path).await {
        Ok(room) => room,
        Err(error) => {
            state.uploads.discard(&path).await;

            return Err(into_status_error(error));
        }
    };

    tracing::info!(room_uuid = %room.uuid, path = %path, "added room image");

    res.status_code(StatusCode::CREATED);

    Ok(Json(room.into()))
}
