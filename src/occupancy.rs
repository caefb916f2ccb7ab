//! Occupancy synchronizer
//!
//! Keeps a room's occupancy counter, occupant set and derived status in step
//! with the statuses of the assignments that point at it. A status *holds* a
//! place while it is `approved` or `active`: entering that set claims a place,
//! leaving it releases one, and every other move leaves the room alone. This
//! means re-saving `approved` twice, or moving `approved -> active`, never
//! counts the tenant twice.

use thiserror::Error;

use crate::{
    assignments::AssignmentStatus,
    rooms::{Occupants, Room, RoomStatus, RoomUuid},
    users::UserUuid,
};

/// What a status change does to the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyEffect {
    /// Room is untouched.
    None,
    /// Tenant takes a place.
    Claim,
    /// Tenant gives up their place.
    Release,
}

impl OccupancyEffect {
    /// Effect of moving from `previous` to `next`.
    #[must_use]
    pub const fn between(previous: AssignmentStatus, next: AssignmentStatus) -> Self {
        match (previous.holds_occupancy(), next.holds_occupancy()) {
            (false, true) => Self::Claim,
            (true, false) => Self::Release,
            (true, true) | (false, false) => Self::None,
        }
    }
}

/// Errors raised while synchronising a room.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OccupancyError {
    /// Every place in the room is already taken.
    #[error("room {room} is full ({capacity} of {capacity} places taken)")]
    CapacityExceeded {
        /// Room that is full.
        room: RoomUuid,
        /// Room capacity.
        capacity: u8,
    },
}

/// New occupancy values for a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMutation {
    /// Places taken after the change.
    pub occupied: u8,
    /// Status after the change.
    pub status: RoomStatus,
    /// Occupant set after the change.
    pub occupants: Occupants,
}

impl RoomMutation {
    /// Write the mutation into a room.
    pub fn apply_to(self, room: &mut Room) {
        room.occupied = self.occupied;
        room.status = self.status;
        room.occupants = self.occupants;
    }
}

/// Work out how `room` changes when `tenant`'s assignment moves from
/// `previous` to `next`.
///
/// `previous` must be the persisted status, not one already overwritten in
/// memory. Returns `Ok(None)` when the room is unaffected.
///
/// # Errors
///
/// Returns [`OccupancyError::CapacityExceeded`] when a place is claimed in a
/// full room.
pub fn synchronize(
    previous: AssignmentStatus,
    next: AssignmentStatus,
    room: &Room,
    tenant: UserUuid,
) -> Result<Option<RoomMutation>, OccupancyError> {
    match OccupancyEffect::between(previous, next) {
        OccupancyEffect::None => Ok(None),
        OccupancyEffect::Claim => claim(room, tenant).map(Some),
        OccupancyEffect::Release => Ok(Some(release(room, tenant))),
    }
}

fn claim(room: &Room, tenant: UserUuid) -> Result<RoomMutation, OccupancyError> {
    if !room.has_vacancy() {
        return Err(OccupancyError::CapacityExceeded {
            room: room.uuid,
            capacity: room.capacity,
        });
    }

    let occupied = room.occupied + 1;
    let mut occupants = room.occupants.clone();

    if !occupants.contains(&tenant) {
        occupants.push(tenant);
    }

    Ok(RoomMutation {
        occupied,
        status: status_after(room, occupied),
        occupants,
    })
}

fn release(room: &Room, tenant: UserUuid) -> RoomMutation {
    let occupied = room.occupied.saturating_sub(1);
    let mut occupants = room.occupants.clone();

    occupants.retain(|occupant| *occupant != tenant);

    RoomMutation {
        occupied,
        status: status_after(room, occupied),
        occupants,
    }
}

fn status_after(room: &Room, occupied: u8) -> RoomStatus {
    if room.in_maintenance() {
        RoomStatus::Maintenance
    } else {
        RoomStatus::derive(occupied, room.capacity)
    }
}
