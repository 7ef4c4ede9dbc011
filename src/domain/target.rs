use std::fmt;

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a scorable target: a member, or the enterprise
/// itself acting as a pseudo-member.
///
/// The derived ordering (members before the enterprise, members by
/// id) is used as the final ranking tie-break so that identical
/// inputs always produce identical orderings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TargetId {
    /// A registered member.
    Member(Uuid),
    /// The enterprise pseudo-member.
    Enterprise,
}

/// A scorable target: who points can be awarded to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    id: TargetId,
    name: NonEmptyString,
    /// When the target was registered. Earlier registration wins
    /// ranking ties.
    registered: DateTime<Utc>,
}

impl Target {
    /// Creates a member target with a freshly generated id.
    #[must_use]
    pub fn member(name: NonEmptyString, registered: DateTime<Utc>) -> Self {
        Self {
            id: TargetId::Member(Uuid::new_v4()),
            name,
            registered,
        }
    }

    /// Creates the enterprise pseudo-member.
    #[must_use]
    pub fn enterprise(name: NonEmptyString, registered: DateTime<Utc>) -> Self {
        Self {
            id: TargetId::Enterprise,
            name,
            registered,
        }
    }

    /// The target's identifier.
    #[must_use]
    pub const fn id(&self) -> TargetId {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// When the target was registered.
    #[must_use]
    pub const fn registered(&self) -> DateTime<Utc> {
        self.registered
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(id) => write!(f, "member {id}"),
            Self::Enterprise => f.write_str("enterprise"),
        }
    }
}
