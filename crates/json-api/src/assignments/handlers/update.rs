//! Update Assignment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use dormitory::assignments::AssignmentStatus;
use dormitory_app::assignments::data::StatusUpdate;

use crate::{
    assignments::{
        errors::into_status_error,
        models::{AssignmentResponse, StatusUpdateRequest},
    },
    extensions::*,
    observability::record_status_change,
    state::State,
};

/// Update Assignment Status Handler
///
/// Approves, rejects, activates or closes an assignment. Occupancy of the room
/// follows the transition.
#[endpoint(
    tags("assignments"),
    summary = "Update Assignment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Assignment updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Assignment not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed or room full"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
#[tracing::instrument(
    name = "assignments.update",
    skip(assignment, json, depot),
    fields(assignment_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    assignment: PathParam<Uuid>,
    json: JsonBody<StatusUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<AssignmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.admin_or_403()?;

    let assignment = assignment.into_inner();
    let request = json.into_inner();

    let status: AssignmentStatus = request.status.parse().or_400("Unknown assignment status")?;

    let span = tracing::Span::current();

    span.record("assignment_uuid", tracing::field::display(assignment));
    span.record("status", tracing::field::display(status));

    let update = StatusUpdate {
        status,
        notes: request.notes,
    };

    let record = state
        .app
        .assignments
        .update_status(actor, assignment.into(), update)
        .await
        .map_err(into_status_error)?;

    record_status_change(record.assignment.status);

    tracing::info!(
        assignment_uuid = %record.assignment.uuid,
        status = %record.assignment.status,
        "updated assignment status"
    );

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use dormitory::{
        assignments::{AssignmentUuid, TransitionError},
        occupancy::OccupancyError,
        rooms::RoomUuid,
    };
    use dormitory_app::{
        assignments::{AssignmentsServiceError, MockAssignmentsService},
        auth::AuthenticatedUser,
    };

    use crate::test_helpers::{TEST_ADMIN, TEST_TENANT, TestServices, make_record, service_as};

    use super::*;

    fn make_service(user: AuthenticatedUser, assignments: MockAssignmentsService) -> Service {
        service_as(
            user,
            TestServices::new().with_assignments(assignments),
            Router::with_path("assignments/{assignment}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_approve_assignment_success() -> TestResult {
        let uuid = AssignmentUuid::new();
        let mut record = make_record(uuid, AssignmentStatus::Approved)?;

        record.assignment.notes = Some("Welcome".to_string());

        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_update_status()
            .once()
            .withf(move |actor, assignment, update| {
                *actor == TEST_ADMIN
                    && *assignment == uuid
                    && update.status == AssignmentStatus::Approved
                    && update.notes.as_deref() == Some("Welcome")
            })
            .return_once(move |_, _, _| Ok(record));

        let mut res = TestClient::put(format!("http://example.com/assignments/{uuid}"))
            .json(&json!({ "status": "approved", "notes": "Welcome" }))
            .send(&make_service(TEST_ADMIN, assignments))
            .await;

        let body: AssignmentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "approved");
        assert_eq!(body.notes.as_deref(), Some("Welcome"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_never_reaches_service() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_update_status().never();

        let res = TestClient::put(format!(
            "http://example.com/assignments/{}",
            AssignmentUuid::new()
        ))
        .json(&json!({ "status": "archived" }))
        .send(&make_service(TEST_ADMIN, assignments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_full_room_returns_409() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_update_status().once().return_once(|_, _, _| {
            Err(AssignmentsServiceError::CapacityExceeded(
                OccupancyError::CapacityExceeded {
                    room: RoomUuid::new(),
                    capacity: 1,
                },
            ))
        });

        let res = TestClient::put(format!(
            "http://example.com/assignments/{}",
            AssignmentUuid::new()
        ))
        .json(&json!({ "status": "approved" }))
        .send(&make_service(TEST_ADMIN, assignments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_disallowed_transition_returns_409() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_update_status().once().return_once(|_, _, _| {
            Err(AssignmentsServiceError::InvalidTransition(
                TransitionError::NotAllowed {
                    from: AssignmentStatus::Completed,
                    to: AssignmentStatus::Active,
                },
            ))
        });

        let res = TestClient::put(format!(
            "http://example.com/assignments/{}",
            AssignmentUuid::new()
        ))
        .json(&json!({ "status": "active" }))
        .send(&make_service(TEST_ADMIN, assignments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_as_tenant_returns_403() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_update_status().never();

        let res = TestClient::put(format!(
            "http://example.com/assignments/{}",
            AssignmentUuid::new()
        ))
        .json(&json!({ "status": "approved" }))
        .send(&make_service(TEST_TENANT, assignments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
