//! The points ledger and escalation engine.
//!
//! Pure computations over tag history the caller supplies: the value
//! a new tag should be recorded with, the current-period ranking
//! across all targets, and semester-close snapshots.

mod engine;
pub use engine::compute_tag_value;

mod ranking;
pub use ranking::{Standing, aggregate_ranking};

mod close;
pub use close::take_snapshot;
