//! Test Helpers

use jiff::{SignedDuration, civil::Date};
use rust_decimal::Decimal;
use sqlx::query;

use dormitory::{
    assignments::AssignmentUuid,
    pricing::{PricingError, StayDates},
    rooms::{Room, RoomDetails, RoomType, RoomUuid},
    users::{UserRole, UserUuid},
};

use crate::{
    domain::{
        assignments::data::NewAssignment,
        rooms::{RoomsService, RoomsServiceError, data::NewRoom},
        users::AuthenticatedUser,
    },
    test::TestContext,
};

pub(crate) fn room_details(number: &str, capacity: u8) -> RoomDetails {
    RoomDetails {
        number: number.to_string(),
        floor: "1".to_string(),
        capacity,
        room_type: RoomType::Double,
        monthly_rate: Decimal::new(6000, 0),
        amenities: vec!["Desk".to_string(), "Wardrobe".to_string()],
        description: "Corner room facing the courtyard".to_string(),
    }
}

pub(crate) async fn create_room(
    ctx: &TestContext,
    number: &str,
    capacity: u8,
) -> Result<Room, RoomsServiceError> {
    ctx.rooms
        .create_room(NewRoom {
            uuid: RoomUuid::new(),
            details: room_details(number, capacity),
        })
        .await
}

/// Force a room's occupancy without going through assignments.
pub(crate) async fn set_occupancy(
    ctx: &TestContext,
    room: RoomUuid,
    occupied: i16,
) -> Result<(), sqlx::Error> {
    query(
        "UPDATE rooms \
         SET occupied = $2, \
             status = CASE WHEN $2 >= capacity THEN 'occupied' ELSE 'available' END \
         WHERE uuid = $1",
    )
    .bind(room.into_uuid())
    .bind(occupied)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

async fn insert_user(
    ctx: &TestContext,
    name: &str,
    email: &str,
    role: UserRole,
) -> Result<AuthenticatedUser, sqlx::Error> {
    let uuid = UserUuid::new();

    query(
        "INSERT INTO users (uuid, name, email, password_hash, role) \
         VALUES ($1, $2, $3, 'not-a-real-hash', $4)",
    )
    .bind(uuid.into_uuid())
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .execute(ctx.db.pool())
    .await?;

    Ok(AuthenticatedUser { uuid, role })
}

pub(crate) async fn create_tenant(
    ctx: &TestContext,
    email: &str,
) -> Result<AuthenticatedUser, sqlx::Error> {
    insert_user(ctx, "Test Tenant", email, UserRole::Tenant).await
}

pub(crate) async fn create_admin(ctx: &TestContext) -> Result<AuthenticatedUser, sqlx::Error> {
    insert_user(ctx, "Warden", "warden@example.com", UserRole::Admin).await
}

pub(crate) fn stay(start: Date, end: Date) -> Result<StayDates, PricingError> {
    StayDates::new(start, end)
}

pub(crate) fn new_assignment(room: RoomUuid, total_price: Option<Decimal>) -> NewAssignment {
    let start = jiff::civil::date(2024, 9, 1);

    NewAssignment {
        uuid: AssignmentUuid::new(),
        room,
        stay: StayDates::new(start, jiff::civil::date(2025, 6, 30))
            .expect("valid default stay"),
        total_price,
        id_document_path: Some("uploads/ids/test.png".to_string()),
    }
}

/// Move an assignment's approval time `ago` into the past.
pub(crate) async fn backdate_approval(
    ctx: &TestContext,
    assignment: AssignmentUuid,
    ago: SignedDuration,
) -> Result<(), sqlx::Error> {
    query(
        "UPDATE room_assignments \
         SET approval_time = now() - make_interval(secs => $2) \
         WHERE uuid = $1",
    )
    .bind(assignment.into_uuid())
    .bind(ago.as_secs_f64())
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}
