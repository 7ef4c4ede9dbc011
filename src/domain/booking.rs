use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Interval,
    resource::{Kind, Resource, ResourceKind},
};

/// A committed reservation of exactly one resource for one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: Uuid,
    slot: Slot,
    member: Uuid,
    interval: Interval,
    title: String,
}

/// Which resource a booking occupies.
///
/// Room and equipment bookings point at a concrete resource by id.
/// External bookings are requests against the single synthetic
/// external resource and carry an approval status; only approved
/// requests occupy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// A booking of an internal room.
    Room {
        /// Id of the booked room.
        room: Uuid,
    },
    /// A borrowing of an equipment item.
    Equipment {
        /// Id of the borrowed item.
        item: Uuid,
    },
    /// A request for a room external to the enterprise.
    External {
        /// Approval status of the request.
        status: RequestStatus,
    },
}

/// Approval status of an external room request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Granted; the slot occupies time.
    Approved,
    /// Denied; the slot never occupies time.
    Rejected,
}

/// The conflict scope of a booking: bookings with equal keys compete
/// for the same time.
///
/// All external requests share one key, because they all draw on the
/// single synthetic external resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKey {
    /// A concrete room.
    Room(Uuid),
    /// A concrete equipment item.
    Equipment(Uuid),
    /// The synthetic external resource.
    External,
}

impl Slot {
    /// The conflict scope this slot competes in.
    #[must_use]
    pub const fn key(&self) -> ResourceKey {
        match self {
            Self::Room { room } => ResourceKey::Room(*room),
            Self::Equipment { item } => ResourceKey::Equipment(*item),
            Self::External { .. } => ResourceKey::External,
        }
    }

    /// The kind of resource this slot draws on.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Room { .. } => ResourceKind::Room,
            Self::Equipment { .. } => ResourceKind::Equipment,
            Self::External { .. } => ResourceKind::External,
        }
    }

    /// Whether the slot occupies time at all.
    ///
    /// Room and equipment bookings always do. External requests only
    /// block time once approved, so pending and rejected requests are
    /// transparent to conflict checks and occupancy views alike.
    #[must_use]
    pub const fn blocks_time(&self) -> bool {
        match self {
            Self::Room { .. } | Self::Equipment { .. } => true,
            Self::External { status } => matches!(status, RequestStatus::Approved),
        }
    }

    /// Whether this slot occupies the given resource's time.
    ///
    /// Rooms and equipment match by id. External requests match the
    /// synthetic external resource, and only once approved: pending
    /// and rejected requests never block time.
    #[must_use]
    pub fn occupies(&self, resource: &Resource) -> bool {
        match (self, resource.kind()) {
            (Self::Room { room }, Kind::Room) => *room == resource.id(),
            (Self::Equipment { item }, Kind::Equipment { .. }) => *item == resource.id(),
            (Self::External { status }, Kind::External) => *status == RequestStatus::Approved,
            _ => false,
        }
    }
}

impl Booking {
    /// Creates a booking with a freshly generated id.
    #[must_use]
    pub fn new(slot: Slot, member: Uuid, interval: Interval, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            slot,
            member,
            interval,
            title,
        }
    }

    /// The booking's stable identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The resource slot this booking occupies.
    #[must_use]
    pub const fn slot(&self) -> &Slot {
        &self.slot
    }

    /// The member who owns the booking.
    #[must_use]
    pub const fn member(&self) -> Uuid {
        self.member
    }

    /// The reserved interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Free-text title shown on the calendar.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Moves the booking to a new interval.
    ///
    /// Callers must re-run the conflict check (excluding this booking)
    /// before persisting the change.
    pub const fn reschedule(&mut self, interval: Interval) {
        self.interval = interval;
    }

    /// Updates the approval status of an external request.
    ///
    /// Returns `false` (and changes nothing) for room and equipment
    /// bookings.
    pub const fn set_request_status(&mut self, status: RequestStatus) -> bool {
        match &mut self.slot {
            Slot::External { status: current } => {
                *current = status;
                true
            }
            Slot::Room { .. } | Slot::Equipment { .. } => false,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        f.write_str(label)
    }
}
