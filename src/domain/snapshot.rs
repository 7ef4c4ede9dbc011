use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::TargetId;

/// An immutable point-in-time score captured when a semester closes.
///
/// Snapshots are created only by the snapshot operation and never
/// mutated afterwards; removing one is an explicit administrative
/// rollback, outside this type's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    target: TargetId,
    semester: Uuid,
    total: i64,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    /// Captures a target's total for a semester at the closing
    /// instant.
    #[must_use]
    pub const fn capture(
        target: TargetId,
        semester: Uuid,
        total: i64,
        taken_at: DateTime<Utc>,
    ) -> Self {
        Self {
            target,
            semester,
            total,
            taken_at,
        }
    }

    /// Whose score this is.
    #[must_use]
    pub const fn target(&self) -> TargetId {
        self.target
    }

    /// The semester the snapshot closes.
    #[must_use]
    pub const fn semester(&self) -> Uuid {
        self.semester
    }

    /// The captured total.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// When the snapshot was taken.
    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}
