//! Dormitory prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    assignments::{
        ALL_STATUSES, Assignment, AssignmentStatus, AssignmentUuid, CheckoutError,
        CheckoutOutcome, GRACE_PERIOD, GRACE_PERIOD_NOTE, LifecycleError, StatusChange,
        TransitionError, apply_status_change, checkout, generate_reference, is_valid_reference,
    },
    dashboard::{
        AssignmentFacts, Bucket, DashboardError, DashboardSeries, DateFilter, Overview,
        ReportWindow, Series, aggregate,
    },
    occupancy::{OccupancyEffect, OccupancyError, RoomMutation, synchronize},
    pricing::{DAYS_PER_MONTH, PricingError, StayDates, estimate_total},
    rooms::{Room, RoomDetails, RoomError, RoomStatus, RoomType, RoomUuid},
    users::{RegistrationError, UserRole, UserUuid},
    uuids::TypedUuid,
};
