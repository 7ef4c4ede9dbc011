use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time interval `[start, end)`.
///
/// Half-open semantics mean a booking ending at 10:00 never conflicts
/// with one starting at 10:00. The constructor is the only place an
/// interval can come into existence, so every [`Interval`] in the
/// system satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Bounds", into = "Bounds")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Raw serialized form of an [`Interval`].
///
/// Deserialization goes through [`Interval::new`] so that malformed
/// intervals in a state file are rejected rather than silently loaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Bounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<Bounds> for Interval {
    type Error = InvalidInterval;

    fn try_from(bounds: Bounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl From<Interval> for Bounds {
    fn from(interval: Interval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
        }
    }
}

/// Error returned when an interval's start is not strictly before its
/// end.
///
/// This is recoverable: callers surface it as an inline validation
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("interval start {start} is not before its end {end}")]
pub struct InvalidInterval {
    /// The rejected start instant.
    pub start: DateTime<Utc>,
    /// The rejected end instant.
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates an interval from its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] unless `start` is strictly before
    /// `end`. Zero-length intervals are rejected: they occupy no time
    /// and always indicate caller error.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidInterval> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidInterval { start, end })
        }
    }

    /// The inclusive start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The exclusive end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether two half-open intervals overlap.
    ///
    /// `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
    /// The test is symmetric.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the interval covers the given instant.
    ///
    /// The start is included, the end is not.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// The overlapping portion of two intervals, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        Self::new(start, end).ok()
    }

    /// The length of the interval. Always positive.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {})", self.start, self.end)
    }
}
