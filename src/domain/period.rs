use std::collections::BTreeMap;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Interval;

/// A named regime of tag templates ("version").
///
/// Whether a period is active is not stored on the period itself;
/// [`PeriodSet`] owns that, so "at most one active period" holds by
/// construction rather than by convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPeriod {
    id: Uuid,
    name: NonEmptyString,
    span: Interval,
}

impl ScoringPeriod {
    /// Creates a period with a freshly generated id.
    #[must_use]
    pub fn new(name: NonEmptyString, span: Interval) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            span,
        }
    }

    /// The period's stable identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The time span the period covers.
    #[must_use]
    pub const fn span(&self) -> Interval {
        self.span
    }
}

/// An orthogonal snapshot period. Semesters bound when score
/// snapshots are taken; they have no influence on which templates are
/// in force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    id: Uuid,
    name: NonEmptyString,
    span: Interval,
}

impl Semester {
    /// Creates a semester with a freshly generated id.
    #[must_use]
    pub fn new(name: NonEmptyString, span: Interval) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            span,
        }
    }

    /// The semester's stable identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The time span the semester covers.
    #[must_use]
    pub const fn span(&self) -> Interval {
        self.span
    }
}

/// The set of scoring periods, with at most one active.
///
/// Activation is an atomic swap: activating one period is what
/// deactivates the previous one. There is no per-period flag to drift
/// out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSet {
    periods: BTreeMap<Uuid, ScoringPeriod>,
    active: Option<Uuid>,
}

/// Error returned when activating a period that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("scoring period {0} not found")]
pub struct UnknownPeriod(pub Uuid);

impl PeriodSet {
    /// Adds a period to the set. New periods start inactive.
    pub fn insert(&mut self, period: ScoringPeriod) {
        self.periods.insert(period.id(), period);
    }

    /// The currently active period, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ScoringPeriod> {
        self.active.and_then(|id| self.periods.get(&id))
    }

    /// Makes the given period the active one, deactivating whichever
    /// was active before.
    ///
    /// Returns the id of the previously active period.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownPeriod`] when no period with that id exists;
    /// the previously active period stays active.
    pub fn activate(&mut self, id: Uuid) -> Result<Option<Uuid>, UnknownPeriod> {
        if !self.periods.contains_key(&id) {
            return Err(UnknownPeriod(id));
        }
        Ok(self.active.replace(id))
    }

    /// Deactivates the active period, leaving none active.
    pub const fn deactivate(&mut self) -> Option<Uuid> {
        self.active.take()
    }

    /// Iterates over all periods in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoringPeriod> {
        self.periods.values()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn span(start: &str, end: &str) -> Interval {
        let start: DateTime<Utc> = start.parse().unwrap();
        let end: DateTime<Utc> = end.parse().unwrap();
        Interval::new(start, end).unwrap()
    }

    fn period(name: &str) -> ScoringPeriod {
        ScoringPeriod::new(
            NonEmptyString::new(name.to_string()).unwrap(),
            span("2025-01-01T00:00:00Z", "2025-07-01T00:00:00Z"),
        )
    }

    #[test]
    fn activation_swaps_atomically() {
        let mut set = PeriodSet::default();
        let first = period("2025.1");
        let second = period("2025.2");
        let first_id = first.id();
        let second_id = second.id();
        set.insert(first);
        set.insert(second);

        assert!(set.active().is_none());

        assert_eq!(set.activate(first_id).unwrap(), None);
        assert_eq!(set.active().unwrap().id(), first_id);

        // Activating another period is the only way the first stops
        // being active.
        assert_eq!(set.activate(second_id).unwrap(), Some(first_id));
        assert_eq!(set.active().unwrap().id(), second_id);
    }

    #[test]
    fn activating_unknown_period_keeps_current() {
        let mut set = PeriodSet::default();
        let known = period("2025.1");
        let known_id = known.id();
        set.insert(known);
        set.activate(known_id).unwrap();

        let missing = Uuid::new_v4();
        assert_eq!(set.activate(missing).unwrap_err(), UnknownPeriod(missing));
        assert_eq!(set.active().unwrap().id(), known_id);
    }
}
