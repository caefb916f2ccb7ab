//! Public Room Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, models::PublicRoomsResponse},
    state::State,
};

/// Public Room Index Handler
///
/// Rooms open for booking, without occupant details.
#[endpoint(tags("rooms"), summary = "List Available Rooms")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PublicRoomsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rooms = state
        .app
        .rooms
        .list_available_rooms()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PublicRoomsResponse {
        rooms: rooms.into_iter().map(Into::into).collect(),
    }))
}
