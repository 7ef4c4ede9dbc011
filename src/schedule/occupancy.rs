use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Booking, Interval, Resource, ResourceKind};

/// One occupied sub-interval in a resource's day, tagged with its
/// source kind for presentation styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupiedSlot {
    /// The occupied portion, clipped to the day's window.
    pub interval: Interval,
    /// Which kind of booking produced the slot.
    pub kind: ResourceKind,
    /// The booking's title.
    pub title: String,
    /// The booking's owner.
    pub member: Uuid,
}

/// A resource's occupancy for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceOccupancy {
    /// The resource's id.
    pub resource: Uuid,
    /// The resource's display name.
    pub name: String,
    /// The resource's kind.
    pub kind: ResourceKind,
    /// Occupied sub-intervals within the day, sorted by start.
    pub slots: Vec<OccupiedSlot>,
}

/// Builds the unified day view across heterogeneous resources.
///
/// Each booking is matched to resources through
/// [`Slot::occupies`](crate::domain::Slot::occupies), so room and
/// equipment bookings land on their own resource and only *approved*
/// external requests occupy the synthetic external resource. Bookings
/// are clipped to the day's `[00:00, 24:00)` UTC window and sorted by
/// start.
///
/// This is a pure filter and sort, re-derived on every call; the
/// booking set is assumed to be fully loaded by the caller.
#[must_use]
pub fn daily_occupancy(
    resources: &[Resource],
    bookings: &[Booking],
    day: NaiveDate,
) -> Vec<ResourceOccupancy> {
    let Some(window) = day_window(day) else {
        return Vec::new();
    };

    resources
        .iter()
        .map(|resource| {
            let mut slots: Vec<OccupiedSlot> = bookings
                .iter()
                .filter(|booking| booking.slot().occupies(resource))
                .filter_map(|booking| {
                    let interval = booking.interval().intersection(&window)?;
                    Some(OccupiedSlot {
                        interval,
                        kind: booking.slot().kind(),
                        title: booking.title().to_string(),
                        member: booking.member(),
                    })
                })
                .collect();

            slots.sort_by_key(|slot| slot.interval.start());

            ResourceOccupancy {
                resource: resource.id(),
                name: resource.name().to_string(),
                kind: resource.resource_kind(),
                slots,
            }
        })
        .collect()
}

/// The UTC `[00:00, 24:00)` window of a calendar day.
fn day_window(day: NaiveDate) -> Option<Interval> {
    let start: DateTime<Utc> = day.and_hms_opt(0, 0, 0)?.and_utc();
    Interval::new(start, start + TimeDelta::days(1)).ok()
}
