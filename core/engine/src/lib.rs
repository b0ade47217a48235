//! CredSync merge engine.
//!
//! This module reconciles two credential stores, including:
//! - Pure record-set merging with primary-wins conflict resolution
//! - Staged copies of both store files for atomic writes
//! - The sync orchestrator sequencing stage, filter, load, merge, write,
//!   commit, and cleanup

pub mod merge;
pub mod staging;
pub mod sync;

// Re-export main types
pub use merge::merge_record_sets;
pub use staging::StagedCopy;
pub use sync::{sync_stores, SyncOutcome, SyncStep};
