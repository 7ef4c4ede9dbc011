use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::TargetId;

/// A ledger entry: one instantiation of a tag template against a
/// target.
///
/// The point value is computed once, when the tag is recorded, and
/// never changes afterwards, even if the template is later edited.
/// That keeps historical totals replayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: Uuid,
    template: Uuid,
    target: TargetId,
    value: i64,
    performed: DateTime<Utc>,
    period: Uuid,
}

impl Tag {
    /// Records a tag with a freshly generated id.
    ///
    /// `value` must be the output of the escalation engine for this
    /// template and target at `performed`.
    #[must_use]
    pub fn record(
        template: Uuid,
        target: TargetId,
        value: i64,
        performed: DateTime<Utc>,
        period: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template,
            target,
            value,
            performed,
            period,
        }
    }

    /// The tag's stable identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The template this tag instantiates.
    #[must_use]
    pub const fn template(&self) -> Uuid {
        self.template
    }

    /// Who the tag scores.
    #[must_use]
    pub const fn target(&self) -> TargetId {
        self.target
    }

    /// The point value frozen at creation.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// When the scored event happened.
    #[must_use]
    pub const fn performed(&self) -> DateTime<Utc> {
        self.performed
    }

    /// The scoring period that was active when the tag was recorded.
    #[must_use]
    pub const fn period(&self) -> Uuid {
        self.period
    }
}
