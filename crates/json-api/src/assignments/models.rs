//! Assignment request and response bodies.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dormitory_app::assignments::models::{
    AssignmentRecord, PrintTransaction, RoomSummary, TenantSummary,
};

/// Tenant Summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantSummaryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<TenantSummary> for TenantSummaryResponse {
    fn from(tenant: TenantSummary) -> Self {
        Self {
            uuid: tenant.uuid.into(),
            name: tenant.name,
            email: tenant.email,
        }
    }
}

/// Room Summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomSummaryResponse {
    pub uuid: Uuid,
    pub number: String,
    pub floor: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub monthly_rate: String,
}

impl From<RoomSummary> for RoomSummaryResponse {
    fn from(room: RoomSummary) -> Self {
        Self {
            uuid: room.uuid.into(),
            number: room.number,
            floor: room.floor,
            room_type: room.room_type.to_string(),
            monthly_rate: room.monthly_rate.to_string(),
        }
    }
}

/// Assignment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentResponse {
    pub uuid: Uuid,

    /// Human-readable reference, e.g. `REF-05012024-K3Q9ZD`
    pub reference: String,

    pub status: String,
    pub tenant: TenantSummaryResponse,
    pub room: RoomSummaryResponse,
    pub start_date: String,
    pub end_date: String,

    /// Whole days between start and end date
    pub duration_days: i64,

    /// Public path of the identity document
    pub id_document: String,

    pub notes: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub checked_out_by: Option<Uuid>,
    pub approval_time: Option<String>,
    pub total_price: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssignmentRecord> for AssignmentResponse {
    fn from(record: AssignmentRecord) -> Self {
        let assignment = record.assignment;

        Self {
            uuid: assignment.uuid.into(),
            reference: assignment.reference,
            status: assignment.status.to_string(),
            tenant: record.tenant.into(),
            room: record.room.into(),
            start_date: assignment.stay.start().to_string(),
            end_date: assignment.stay.end().to_string(),
            duration_days: assignment.stay.days(),
            id_document: assignment.id_document_path,
            notes: assignment.notes,
            check_in_time: assignment.check_in_time.as_ref().map(ToString::to_string),
            check_out_time: assignment.check_out_time.as_ref().map(ToString::to_string),
            checked_out_by: assignment.checked_out_by.map(Into::into),
            approval_time: assignment.approval_time.as_ref().map(ToString::to_string),
            total_price: assignment.total_price.as_ref().map(ToString::to_string),
            created_at: assignment.created_at.to_string(),
            updated_at: assignment.updated_at.to_string(),
        }
    }
}

/// Assignments Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssignmentsResponse {
    pub assignments: Vec<AssignmentResponse>,
}

impl From<Vec<AssignmentRecord>> for AssignmentsResponse {
    fn from(records: Vec<AssignmentRecord>) -> Self {
        Self {
            assignments: records.into_iter().map(Into::into).collect(),
        }
    }
}

/// Print Transaction
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrintTransactionResponse {
    pub reference: String,
    pub tenant_name: String,
    pub tenant_email: String,
    pub room_number: String,
    pub status: String,
    pub check_in: String,
    pub check_out: String,
    pub duration_days: i64,
    pub total_price: Option<String>,
}

impl From<PrintTransaction> for PrintTransactionResponse {
    fn from(row: PrintTransaction) -> Self {
        Self {
            reference: row.reference,
            tenant_name: row.tenant_name,
            tenant_email: row.tenant_email,
            room_number: row.room_number,
            status: row.status.to_string(),
            check_in: row.check_in.to_string(),
            check_out: row.check_out.to_string(),
            duration_days: row.duration_days,
            total_price: row.total_price.as_ref().map(ToString::to_string),
        }
    }
}

/// Print Transactions Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PrintTransactionsResponse {
    pub transactions: Vec<PrintTransactionResponse>,
}

/// Status Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusUpdateRequest {
    /// One of `pending`, `approved`, `rejected`, `active`, `completed`, `cancelled`
    pub status: String,

    /// Replaces the stored notes when present
    pub notes: Option<String>,
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// `cancelled` inside the grace period, `completed` after it
    pub outcome: String,
    pub assignment: AssignmentResponse,
}
