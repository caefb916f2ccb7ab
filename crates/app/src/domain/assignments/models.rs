//! Assignment Models

use jiff::civil::Date;
use rust_decimal::Decimal;

use dormitory::{
    assignments::{Assignment, AssignmentStatus, CheckoutOutcome},
    rooms::{RoomType, RoomUuid},
    users::UserUuid,
};

/// Tenant fields shown alongside an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSummary {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

/// Room fields shown alongside an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub uuid: RoomUuid,
    pub number: String,
    pub floor: String,
    pub room_type: RoomType,
    pub monthly_rate: Decimal,
}

/// Assignment Model
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    pub assignment: Assignment,
    pub tenant: TenantSummary,
    pub room: RoomSummary,
}

/// Result of a tenant checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub outcome: CheckoutOutcome,
    pub record: AssignmentRecord,
}

/// One row of the printable transactions report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintTransaction {
    pub reference: String,
    pub tenant_name: String,
    pub tenant_email: String,
    pub room_number: String,
    pub status: AssignmentStatus,
    pub check_in: Date,
    pub check_out: Date,
    pub duration_days: i64,
    pub total_price: Option<Decimal>,
}
