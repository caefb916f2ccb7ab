//! Update Room Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use dormitory_app::rooms::data::RoomUpdate;

use crate::{
    extensions::*,
    rooms::{
        errors::into_status_error,
        models::{RoomRequest, RoomResponse},
    },
    state::State,
};

/// Update Room Handler
///
/// Replaces the editable details; `maintenance` toggles the maintenance status.
#[endpoint(
    tags("rooms"),
    summary = "Update Room",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Room updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
#[tracing::instrument(
    name = "rooms.update",
    skip(room, json, depot),
    fields(room_uuid = tracing::field::Empty, maintenance = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    json: JsonBody<RoomRequest>,
    depot: &mut Depot,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let room = room.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("room_uuid", tracing::field::display(room));
    span.record("maintenance", tracing::field::debug(request.maintenance));

    let update = RoomUpdate {
        details: request.details()?,
        maintenance: request.maintenance,
    };

    let room = state
        .app
        .rooms
        .update_room(room.into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(room_uuid = %room.uuid, status = %room.status, "updated room");

    Ok(Json(room.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dormitory::rooms::{RoomError, RoomStatus, RoomUuid};
    use dormitory_app::rooms::{MockRoomsService, RoomsServiceError};

    use crate::test_helpers::{TEST_ADMIN, TestServices, make_room, service_as};

    use super::*;

    fn make_service(rooms: MockRoomsService) -> Service {
        service_as(
            TEST_ADMIN,
            TestServices::new().with_rooms(rooms),
            Router::with_path("rooms/{room}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_room_into_maintenance() -> TestResult {
        let uuid = RoomUuid::new();
        let mut room = make_room(uuid);

        room.status = RoomStatus::Maintenance;

        let mut rooms = MockRoomsService::new();

        rooms
            .expect_update_room()
            .once()
            .withf(move |u, update| *u == uuid && update.maintenance == Some(true))
            .return_once(move |_, _| Ok(room));

        let mut res = TestClient::put(format!("http://example.com/rooms/{uuid}"))
            .json(&json!({
                "number": "A101",
                "floor": "1",
                "capacity": 2,
                "monthlyRate": "6000",
                "maintenance": true,
            }))
            .send(&make_service(rooms))
            .await;

        let body: RoomResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "maintenance");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_room_capacity_below_occupancy_returns_400() -> TestResult {
        let uuid = RoomUuid::new();
        let mut rooms = MockRoomsService::new();

        rooms.expect_update_room().once().return_once(|_, _| {
            Err(RoomsServiceError::Invalid(RoomError::CapacityBelowOccupancy {
                capacity: 1,
                occupied: 2,
            }))
        });

        let res = TestClient::put(format!("http://example.com/rooms/{uuid}"))
            .json(&json!({
                "number": "A101",
                "floor": "1",
                "capacity": 1,
                "monthlyRate": "6000",
            }))
            .send(&make_service(rooms))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_room_unknown_type_returns_400() -> TestResult {
        let mut rooms = MockRoomsService::new();

        rooms.expect_update_room().never();

        let res = TestClient::put(format!("http://example.com/rooms/{}", RoomUuid::new()))
            .json(&json!({
                "number": "A101",
                "floor": "1",
                "capacity": 2,
                "type": "Penthouse",
                "monthlyRate": "6000",
            }))
            .send(&make_service(rooms))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
