//! Persistence-collaborator stand-ins.
//!
//! The real platform delegates durability to a relational store; this
//! crate's decision logic only ever sees data a collaborator already
//! fetched. [`MemoryStore`] is that collaborator realised in memory,
//! with the two guarantees the original lacked: compare-and-swap
//! booking commits and atomic snapshot-then-reset semester close.

pub mod memory;
pub use memory::{CloseError, CommitError, MemoryStore, PartialSnapshotFailure, RecordError};
