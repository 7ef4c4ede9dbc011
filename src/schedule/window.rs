use chrono::{DateTime, Utc};

use crate::domain::Booking;

/// The answer to "when is this resource free?".
///
/// The occupied and free cases are deliberately distinct variants:
/// callers display different text for "occupied right now" and "free
/// until 15:00", so collapsing them would lose information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// A booking covers the asked-about instant.
    Occupied {
        /// When the resource is released. Chains of back-to-back
        /// bookings are walked through, so this is the first instant
        /// the resource is genuinely free.
        until: DateTime<Utc>,
    },
    /// Free now, but a future booking starts at the given instant.
    FreeUntil(DateTime<Utc>),
    /// Free now with nothing scheduled afterwards.
    Free,
}

/// Computes the availability of a resource at `from`, given its
/// bookings.
///
/// `bookings` must already be scoped to one resource, as with the
/// conflict check. If a booking covers `from`, the result is
/// [`Availability::Occupied`] with the release instant extended
/// through any bookings that start at or before the previous one
/// ends. Otherwise the result is the start of the nearest future
/// booking, or [`Availability::Free`] when there is none.
#[must_use]
pub fn next_available_window(bookings: &[Booking], from: DateTime<Utc>) -> Availability {
    let covering = bookings
        .iter()
        .filter(|booking| booking.interval().contains(from))
        .map(|booking| booking.interval().end())
        .max();

    if let Some(first_release) = covering {
        return Availability::Occupied {
            until: release_instant(bookings, first_release),
        };
    }

    bookings
        .iter()
        .map(|booking| booking.interval().start())
        .filter(|start| *start > from)
        .min()
        .map_or(Availability::Free, Availability::FreeUntil)
}

/// Extends a tentative release instant through abutting or
/// overlapping follow-on bookings.
fn release_instant(bookings: &[Booking], mut until: DateTime<Utc>) -> DateTime<Utc> {
    let mut starts: Vec<_> = bookings
        .iter()
        .map(|booking| (booking.interval().start(), booking.interval().end()))
        .collect();
    starts.sort_unstable();

    for (start, end) in starts {
        if start <= until {
            until = until.max(end);
        } else {
            break;
        }
    }
    until
}
