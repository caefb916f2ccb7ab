//! Assignments Data

use rust_decimal::Decimal;

use dormitory::{
    assignments::{AssignmentStatus, AssignmentUuid},
    pricing::StayDates,
    rooms::RoomUuid,
};

/// New Assignment Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub uuid: AssignmentUuid,
    pub room: RoomUuid,
    pub stay: StayDates,
    /// Explicit price; estimated from the room rate when absent.
    pub total_price: Option<Decimal>,
    /// Stored identity document, relative to the uploads root.
    pub id_document_path: Option<String>,
}

/// Admin decision on an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: AssignmentStatus,
    /// Replaces the notes when present.
    pub notes: Option<String>,
}
