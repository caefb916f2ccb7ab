//! Create Assignment Handler

use std::{str::FromStr, sync::Arc};

use jiff::civil::Date;
use rust_decimal::Decimal;
use salvo::{http::header::LOCATION, prelude::*};
use uuid::Uuid;

use dormitory::{assignments::AssignmentUuid, pricing::StayDates};
use dormitory_app::assignments::data::NewAssignment;

use crate::{
    assignments::{errors::into_status_error, models::AssignmentResponse},
    extensions::*,
    state::State,
    uploads::{self, UploadKind},
};

const ID_IMAGE_FIELD: &str = "idImage";

async fn required_field<T>(req: &mut Request, name: &str) -> Result<T, StatusError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = req.form::<String>(name).await else {
        return Err(StatusError::bad_request().brief(format!("Missing field \"{name}\"")));
    };

    value.trim().parse().or_400(&format!("Invalid field \"{name}\""))
}

/// Create Assignment Handler
///
/// Multipart request with `room`, `startDate`, `endDate`, an optional
/// `totalPrice` and the tenant's identity document as `idImage`.
#[endpoint(
    tags("assignments"),
    summary = "Request Room",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Assignment requested"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid form data or upload"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
        (status_code = StatusCode::CONFLICT, description = "Room unavailable or open assignment exists"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AssignmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.current_user_or_401()?;

    let room: Uuid = required_field(req, "room").await?;
    let start: Date = required_field(req, "startDate").await?;
    let end: Date = required_field(req, "endDate").await?;

    let total_price = match req.form::<String>("totalPrice").await {
        Some(value) if !value.trim().is_empty() => Some(
            Decimal::from_str(value.trim()).or_400("Invalid field \"totalPrice\"")?,
        ),
        _ => None,
    };

    let stay = StayDates::new(start, end)
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let id_document_path = match req.file(ID_IMAGE_FIELD).await {
        Some(file) => Some(
            state
                .uploads
                .store(UploadKind::IdDocument, file)
                .await
                .map_err(uploads::into_status_error)?,
        ),
        None => None,
    };

    let new_assignment = NewAssignment {
        uuid: AssignmentUuid::new(),
        room: room.into(),
        stay,
        total_price,
        id_document_path: id_document_path.clone(),
    };

    let record = match state
        .app
        .assignments
        .create_assignment(tenant, new_assignment)
        .await
    {
        Ok(record) => record,
        Err(error) => {
            if let Some(path) = &id_document_path {
                state.uploads.discard(path).await;
            }

            return Err(into_status_error(error));
        }
    };

    tracing::info!(
        assignment_uuid = %record.assignment.uuid,
        reference = %record.assignment.reference,
        room_uuid = %record.room.uuid,
        "requested room"
    );

    res.add_header(
        LOCATION,
        format!("/assignments/{}", record.assignment.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use dormitory::assignments::AssignmentStatus;
    use dormitory_app::assignments::{AssignmentsServiceError, MockAssignmentsService};

    use crate::{
        test_helpers::{
            MultipartFile, TEST_TENANT, TestServices, make_record, multipart_body,
            multipart_content_type, service_as,
        },
        uploads::UploadStore,
    };

    use super::*;

    fn make_service(assignments: MockAssignmentsService, uploads: UploadStore) -> Service {
        service_as(
            TEST_TENANT,
            TestServices::new()
                .with_assignments(assignments)
                .with_uploads(uploads),
            Router::with_path("assignments").post(handler),
        )
    }

    fn id_image() -> MultipartFile<'static> {
        MultipartFile {
            field: ID_IMAGE_FIELD,
            file_name: "passport.jpeg",
            content_type: "image/jpeg",
            contents: "not really a jpeg",
        }
    }

    fn form(room: &str, start: &str, end: &str) -> String {
        multipart_body(
            &[("room", room), ("startDate", start), ("endDate", end)],
            Some(id_image()),
        )
    }

    #[tokio::test]
    async fn test_create_assignment_success() -> TestResult {
        let root = tempfile::tempdir()?;
        let room = Uuid::from_u128(7);
        let record = make_record(AssignmentUuid::new(), AssignmentStatus::Pending)?;
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_create_assignment()
            .once()
            .withf(move |tenant, new| {
                *tenant == TEST_TENANT
                    && new.room.into_uuid() == room
                    && new.stay.start() == date(2024, 9, 1)
                    && new.stay.end() == date(2025, 6, 30)
                    && new.total_price.is_none()
                    && new.id_document_path.as_deref().is_some_and(|path| {
                        path.starts_with("uploads/ids/") && path.ends_with(".jpg")
                    })
            })
            .return_once(move |_, _| Ok(record));

        let mut res = TestClient::post("http://example.com/assignments")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(form(&room.to_string(), "2024-09-01", "2025-06-30"))
            .send(&make_service(assignments, UploadStore::new(root.path(), 1024)))
            .await;

        let body: AssignmentResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/assignments/{}", body.uuid).as_str()));
        assert_eq!(body.status, "pending");
        assert_eq!(body.reference, "REF-01092024-K3Q9ZD");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_passes_explicit_price() -> TestResult {
        let root = tempfile::tempdir()?;
        let room = Uuid::from_u128(7).to_string();
        let record = make_record(AssignmentUuid::new(), AssignmentStatus::Pending)?;
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_create_assignment()
            .once()
            .withf(|_, new| new.total_price == Some(Decimal::new(4_500, 0)))
            .return_once(move |_, _| Ok(record));

        let body = multipart_body(
            &[
                ("room", &room),
                ("startDate", "2024-09-01"),
                ("endDate", "2024-10-01"),
                ("totalPrice", "4500"),
            ],
            Some(id_image()),
        );

        let res = TestClient::post("http://example.com/assignments")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(body)
            .send(&make_service(assignments, UploadStore::new(root.path(), 1024)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_end_before_start_returns_400() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_create_assignment().never();

        let res = TestClient::post("http://example.com/assignments")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(form(&Uuid::from_u128(7).to_string(), "2024-09-10", "2024-09-01"))
            .send(&make_service(assignments, UploadStore::new(root.path(), 1024)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_bad_date_returns_400() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_create_assignment().never();

        let res = TestClient::post("http://example.com/assignments")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(form(&Uuid::from_u128(7).to_string(), "next week", "2024-09-01"))
            .send(&make_service(assignments, UploadStore::new(root.path(), 1024)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_without_document_reaches_service() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_create_assignment()
            .once()
            .withf(|_, new| new.id_document_path.is_none())
            .return_once(|_, _| Err(AssignmentsServiceError::MissingIdDocument));

        let body = multipart_body(
            &[
                ("room", &Uuid::from_u128(7).to_string()),
                ("startDate", "2024-09-01"),
                ("endDate", "2024-10-01"),
            ],
            None,
        );

        let res = TestClient::post("http://example.com/assignments")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(body)
            .send(&make_service(assignments, UploadStore::new(root.path(), 1024)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_conflict_discards_document() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_create_assignment()
            .once()
            .return_once(|_, _| Err(AssignmentsServiceError::AlreadyHasOpenAssignment));

        let res = TestClient::post("http://example.com/assignments")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(form(&Uuid::from_u128(7).to_string(), "2024-09-01", "2024-10-01"))
            .send(&make_service(assignments, UploadStore::new(root.path(), 1024)))
            .await;

        let leftovers = std::fs::read_dir(root.path().join("ids"))?.count();

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(leftovers, 0, "expected the identity document to be discarded");

        Ok(())
    }
}
