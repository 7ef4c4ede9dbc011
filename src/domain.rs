//! Domain models for the Odin platform core.
//!
//! This module contains the shared value objects the scheduling and
//! points engines operate on: time intervals, bookable resources,
//! bookings, scorable targets, tag templates, the tag ledger, scoring
//! periods and score snapshots.

mod interval;
pub use interval::{Interval, InvalidInterval};

/// Bookable resources and their kinds.
pub mod resource;
pub use resource::{EquipmentStatus, Resource, ResourceKind};

/// Bookings and the slots they occupy.
pub mod booking;
pub use booking::{Booking, RequestStatus, ResourceKey, Slot};

mod target;
pub use target::{Target, TargetId};

/// Tag templates and escalation rules.
pub mod template;
pub use template::{Escalation, InvalidTemplateConfiguration, TagTemplate};

mod tag;
pub use tag::Tag;

/// Scoring periods, semesters and the activation set.
pub mod period;
pub use period::{PeriodSet, ScoringPeriod, Semester, UnknownPeriod};

mod snapshot;
pub use snapshot::Snapshot;
