//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;
use uuid::Uuid;

use dormitory::{
    assignments::{Assignment, AssignmentStatus, AssignmentUuid},
    pricing::StayDates,
    rooms::{Occupants, Room, RoomStatus, RoomType, RoomUuid},
    users::{UserRole, UserUuid},
};
use dormitory_app::{
    assignments::{
        MockAssignmentsService,
        models::{AssignmentRecord, RoomSummary, TenantSummary},
    },
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    dashboard::MockDashboardService,
    rooms::MockRoomsService,
};

use crate::{extensions::*, state::State, uploads::UploadStore};

pub(crate) const TEST_TENANT: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::nil()),
    role: UserRole::Tenant,
};

pub(crate) const TEST_ADMIN: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    role: UserRole::Admin,
};

const TEST_UPLOAD_MAX_BYTES: u64 = 1024 * 1024;

/// Stands in for the auth middleware.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectUser(pub(crate) AuthenticatedUser);

#[async_trait]
impl Handler for InjectUser {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_current_user(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

fn strict_rooms_mock() -> MockRoomsService {
    let mut rooms = MockRoomsService::new();

    rooms.expect_list_rooms().never();
    rooms.expect_list_available_rooms().never();
    rooms.expect_get_room().never();
    rooms.expect_create_room().never();
    rooms.expect_update_room().never();
    rooms.expect_delete_room().never();
    rooms.expect_add_image().never();

    rooms
}

fn strict_assignments_mock() -> MockAssignmentsService {
    let mut assignments = MockAssignmentsService::new();

    assignments.expect_create_assignment().never();
    assignments.expect_list_assignments().never();
    assignments.expect_list_pending_assignments().never();
    assignments.expect_get_assignment().never();
    assignments.expect_update_status().never();
    assignments.expect_checkout().never();
    assignments.expect_list_print_transactions().never();

    assignments
}

fn strict_dashboard_mock() -> MockDashboardService {
    let mut dashboard = MockDashboardService::new();

    dashboard.expect_get_stats().never();

    dashboard
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_verify().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_get_user().never();
    auth.expect_sweep_expired_registrations().never();

    auth
}

/// Service mocks for one test; anything not replaced must never be called.
pub(crate) struct TestServices {
    rooms: MockRoomsService,
    assignments: MockAssignmentsService,
    dashboard: MockDashboardService,
    auth: MockAuthService,
    uploads: UploadStore,
}

impl TestServices {
    pub(crate) fn new() -> Self {
        Self {
            rooms: strict_rooms_mock(),
            assignments: strict_assignments_mock(),
            dashboard: strict_dashboard_mock(),
            auth: strict_auth_mock(),
            uploads: UploadStore::new(
                std::env::temp_dir().join("dormitory-json-tests"),
                TEST_UPLOAD_MAX_BYTES,
            ),
        }
    }

    pub(crate) fn with_rooms(mut self, rooms: MockRoomsService) -> Self {
        self.rooms = rooms;
        self
    }

    pub(crate) fn with_assignments(mut self, assignments: MockAssignmentsService) -> Self {
        self.assignments = assignments;
        self
    }

    pub(crate) fn with_dashboard(mut self, dashboard: MockDashboardService) -> Self {
        self.dashboard = dashboard;
        self
    }

    pub(crate) fn with_auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn with_uploads(mut self, uploads: UploadStore) -> Self {
        self.uploads = uploads;
        self
    }

    pub(crate) fn state(self) -> Arc<State> {
        let app = AppContext {
            rooms: Arc::new(self.rooms),
            assignments: Arc::new(self.assignments),
            dashboard: Arc::new(self.dashboard),
            auth: Arc::new(self.auth),
        };

        State::shared(app, self.uploads)
    }

    pub(crate) fn inject(self) -> impl Handler {
        inject(self.state())
    }
}

/// Serve `route` as if `user` had already authenticated.
pub(crate) fn service_as(user: AuthenticatedUser, services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(services.inject())
            .hoop(InjectUser(user))
            .push(route),
    )
}

/// Serve `route` without a current user.
pub(crate) fn anonymous_service(services: TestServices, route: Router) -> Service {
    Service::new(Router::new().hoop(services.inject()).push(route))
}

pub(crate) fn make_room(uuid: RoomUuid) -> Room {
    Room {
        uuid,
        number: "A101".to_string(),
        floor: "1".to_string(),
        capacity: 2,
        occupied: 1,
        room_type: RoomType::Double,
        status: RoomStatus::Available,
        monthly_rate: Decimal::new(600_000, 2),
        images: vec!["uploads/rooms/a101.png".to_string()],
        amenities: vec!["Wi-Fi".to_string(), "Desk".to_string()],
        description: "Corner room".to_string(),
        occupants: Occupants::from_slice(&[TEST_TENANT.uuid]),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_record(
    uuid: AssignmentUuid,
    status: AssignmentStatus,
) -> TestResult<AssignmentRecord> {
    let room = RoomUuid::from_uuid(Uuid::from_u128(7));

    Ok(AssignmentRecord {
        assignment: Assignment {
            uuid,
            reference: "REF-01092024-K3Q9ZD".to_string(),
            user: TEST_TENANT.uuid,
            room,
            stay: StayDates::new(date(2024, 9, 1), date(2025, 6, 30))?,
            id_document_path: "uploads/ids/test.png".to_string(),
            status,
            notes: None,
            check_in_time: None,
            check_out_time: None,
            checked_out_by: None,
            approval_time: None,
            total_price: Some(Decimal::new(60_000, 0)),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        tenant: TenantSummary {
            uuid: TEST_TENANT.uuid,
            name: "Ada Tenant".to_string(),
            email: "ada@example.com".to_string(),
        },
        room: RoomSummary {
            uuid: room,
            number: "A101".to_string(),
            floor: "1".to_string(),
            room_type: RoomType::Double,
            monthly_rate: Decimal::new(600_000, 2),
        },
    })
}

pub(crate) const MULTIPART_BOUNDARY: &str = "dormitory-test-boundary";

/// A file field for [`multipart_body`].
pub(crate) struct MultipartFile<'a> {
    pub(crate) field: &'a str,
    pub(crate) file_name: &'a str,
    pub(crate) content_type: &'a str,
    pub(crate) contents: &'a str,
}

/// `Content-Type` header value matching [`multipart_body`].
pub(crate) fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
}

pub(crate) fn multipart_body(fields: &[(&str, &str)], file: Option<MultipartFile<'_>>) -> String {
    let mut body = String::new();

    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }

    if let Some(file) = file {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n{}\r\n",
            file.field, file.file_name, file.content_type, file.contents
        ));
    }

    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));

    body
}
