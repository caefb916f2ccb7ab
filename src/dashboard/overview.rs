//! Point-in-time headline figures.

use rust_decimal::Decimal;

use crate::{assignments::AssignmentStatus, rooms::RoomStatus};

/// Current state of the dormitory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    /// Rooms on record.
    pub total_rooms: u32,
    /// Rooms with free places.
    pub available_rooms: u32,
    /// Full rooms.
    pub occupied_rooms: u32,
    /// Rooms out of service.
    pub maintenance_rooms: u32,
    /// Places across every room.
    pub total_capacity: u32,
    /// Places taken across every room.
    pub total_occupied: u32,
    /// Bookings awaiting a decision.
    pub pending_assignments: u32,
    /// Tenants currently living in.
    pub active_assignments: u32,
    /// Registered tenant accounts.
    pub tenants: u32,
}

impl Overview {
    /// Count a room.
    pub fn add_room(&mut self, status: RoomStatus, capacity: u8, occupied: u8) {
        self.total_rooms += 1;
        self.total_capacity += u32::from(capacity);
        self.total_occupied += u32::from(occupied);

        match status {
            RoomStatus::Available => self.available_rooms += 1,
            RoomStatus::Occupied => self.occupied_rooms += 1,
            RoomStatus::Maintenance => self.maintenance_rooms += 1,
        }
    }

    /// Count `count` assignments in `status`.
    pub fn add_assignments(&mut self, status: AssignmentStatus, count: u32) {
        match status {
            AssignmentStatus::Pending => self.pending_assignments += count,
            AssignmentStatus::Active => self.active_assignments += count,
            _ => {}
        }
    }

    /// Share of places taken, as a percentage with one decimal place.
    #[must_use]
    pub fn occupancy_rate(&self) -> Decimal {
        if self.total_capacity == 0 {
            return Decimal::ZERO;
        }

        (Decimal::from(self.total_occupied) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total_capacity))
        .round_dp(1)
    }
}
