use tracing::debug;
use uuid::Uuid;

use crate::domain::{Booking, Interval};

/// A candidate interval was rejected because an existing booking
/// overlaps it.
///
/// This is recoverable: the caller surfaces it as a validation
/// message and the user picks another slot. The struct carries enough
/// of the blocking booking to render that message without another
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("requested slot {candidate} overlaps '{title}' ({occupied})")]
pub struct Conflict {
    /// Id of the blocking booking.
    pub booking: Uuid,
    /// Title of the blocking booking.
    pub title: String,
    /// The blocking booking's interval.
    pub occupied: Interval,
    /// The rejected candidate interval.
    pub candidate: Interval,
}

/// Decides whether a candidate interval may be committed against a
/// resource.
///
/// `existing` must already be scoped to the resource in question; the
/// check does not filter by resource itself. `exclude` names a
/// booking to skip, used when rescheduling so a booking does not
/// conflict with itself.
///
/// The check is a pure first-conflict scan with half-open overlap
/// semantics: a booking ending at 10:00 never blocks a candidate
/// starting at 10:00. Any true overlap is rejected uniformly, however
/// short.
///
/// # Errors
///
/// Returns [`Conflict`] describing the first overlapping booking
/// found. No attempt is made to enumerate further conflicts.
pub fn check_availability(
    candidate: Interval,
    existing: &[Booking],
    exclude: Option<Uuid>,
) -> Result<(), Conflict> {
    let blocking = existing
        .iter()
        .filter(|booking| Some(booking.id()) != exclude)
        .find(|booking| booking.interval().overlaps(&candidate));

    match blocking {
        None => Ok(()),
        Some(booking) => {
            debug!(booking = %booking.id(), %candidate, "candidate interval rejected");
            Err(Conflict {
                booking: booking.id(),
                title: booking.title().to_string(),
                occupied: booking.interval(),
                candidate,
            })
        }
    }
}
