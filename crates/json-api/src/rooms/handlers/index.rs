//! Room Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, models::RoomsResponse},
    state::State,
};

/// Room Index Handler
///
/// Returns every room.
#[endpoint(
    tags("rooms"),
    summary = "List Rooms",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Rooms"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RoomsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.current_user_or_401()?;

    let rooms = state
        .app
        .rooms
        .list_rooms()
        .await
        .map_err(into_status_error)?;

    Ok(Json(RoomsResponse {
        rooms: rooms.into_iter().map(Into::into).collect(),
    }))
}
