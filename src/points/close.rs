use chrono::{DateTime, Utc};

use crate::domain::{Semester, Snapshot, TargetId};

/// Captures one immutable snapshot per target for a closing semester.
///
/// Every record is stamped with the same `closed_at` instant. The
/// snapshots own their data: mutating the source totals afterwards
/// cannot change what was captured.
///
/// This function only builds the records. Persisting them and
/// resetting the live totals is the caller's job, and must happen in
/// that order: snapshot first, reset second, as one logical
/// transaction. [`MemoryStore::close_semester`] is the store-side
/// operation that owns this sequencing.
///
/// [`MemoryStore::close_semester`]: crate::storage::MemoryStore::close_semester
#[must_use]
pub fn take_snapshot(
    semester: &Semester,
    totals: &[(TargetId, i64)],
    closed_at: DateTime<Utc>,
) -> Vec<Snapshot> {
    totals
        .iter()
        .map(|&(target, total)| Snapshot::capture(target, semester.id(), total, closed_at))
        .collect()
}
