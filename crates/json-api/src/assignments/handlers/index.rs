//! Assignment Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    assignments::{errors::into_status_error, models::AssignmentsResponse},
    extensions::*,
    state::State,
};

/// Assignment Index Handler
///
/// Admins see every assignment, tenants only their own.
#[endpoint(
    tags("assignments"),
    summary = "List Assignments",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Assignments"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AssignmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let viewer = depot.current_user_or_401()?;

    let records = state
        .app
        .assignments
        .list_assignments(viewer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(records.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dormitory::assignments::{AssignmentStatus, AssignmentUuid};
    use dormitory_app::assignments::MockAssignmentsService;

    use crate::test_helpers::{
        TEST_ADMIN, TEST_TENANT, TestServices, anonymous_service, make_record, service_as,
    };

    use super::*;

    #[tokio::test]
    async fn test_list_assignments_is_scoped_to_the_caller() -> TestResult {
        let record = make_record(AssignmentUuid::new(), AssignmentStatus::Pending)?;
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_list_assignments()
            .once()
            .withf(|viewer| *viewer == TEST_TENANT)
            .return_once(move |_| Ok(vec![record]));

        let mut res = TestClient::get("http://example.com/assignments")
            .send(&service_as(
                TEST_TENANT,
                TestServices::new().with_assignments(assignments),
                Router::with_path("assignments").get(handler),
            ))
            .await;

        let body: AssignmentsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.assignments.len(), 1);
        assert_eq!(body.assignments[0].tenant.email, "ada@example.com");
        assert_eq!(body.assignments[0].duration_days, 302);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_assignments_as_admin() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_list_assignments()
            .once()
            .withf(|viewer| viewer.is_admin())
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/assignments")
            .send(&service_as(
                TEST_ADMIN,
                TestServices::new().with_assignments(assignments),
                Router::with_path("assignments").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_assignments_without_user_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/assignments")
            .send(&anonymous_service(
                TestServices::new(),
                Router::with_path("assignments").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
