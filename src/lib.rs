//! Core engines of the Odin junior-enterprise platform.
//!
//! Two cooperating pieces: the availability/conflict resolver behind
//! room, equipment and external-room booking, and the JR Points
//! ledger with its streak-escalation scoring. Both are pure decision
//! logic over data a persistence collaborator supplies; the
//! [`storage`] module provides the in-memory collaborator the CLI and
//! tests run against.

pub mod domain;
pub use domain::{
    Booking, Interval, InvalidInterval, InvalidTemplateConfiguration, PeriodSet, RequestStatus,
    Resource, ResourceKey, ResourceKind, ScoringPeriod, Semester, Slot, Snapshot, Tag, TagTemplate,
    Target, TargetId,
};

/// Availability checking and the unified scheduling view.
pub mod schedule;
pub use schedule::{Availability, Conflict};

/// The points ledger and escalation engine.
pub mod points;
pub use points::Standing;

/// Persistence-collaborator stand-ins.
pub mod storage;
pub use storage::MemoryStore;
