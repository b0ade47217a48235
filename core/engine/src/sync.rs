//! Sync orchestrator sequencing one reconciliation of two stores.

use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use credsync_common::Result;
use credsync_store::{
    delete_blank_principals, load_records, replace_all, table_columns, Store,
};

use crate::merge::merge_record_sets;
use crate::staging::StagedCopy;

/// Steps of one sync operation, in execution order.
///
/// Any failure after `StageCopies` aborts the whole operation; `Cleanup`
/// runs on every path via the staged copies' drop handling. The originals
/// are only mutated during `CommitOriginals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    StageCopies,
    Validate,
    Load,
    Merge,
    WriteStaged,
    CommitOriginals,
    Cleanup,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStep::StageCopies => "stage copies",
            SyncStep::Validate => "validate",
            SyncStep::Load => "load",
            SyncStep::Merge => "merge",
            SyncStep::WriteStaged => "write staged",
            SyncStep::CommitOriginals => "commit originals",
            SyncStep::Cleanup => "cleanup",
        };
        write!(f, "{}", name)
    }
}

/// Counts reported by a successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Invalid records deleted from the primary store.
    pub invalid_primary: usize,
    /// Invalid records deleted from the secondary store.
    pub invalid_secondary: usize,
    /// Records both stores hold after the sync.
    pub synced: usize,
}

/// Reconcile two store files so both contain the union of valid records,
/// the primary winning ties by identity key.
///
/// All work happens against staged copies of both files; the originals are
/// overwritten only after both copies were fully merged and rewritten. On
/// any failure the originals are left byte-identical to their state before
/// the call and the staging files are removed.
///
/// # Errors
/// - `Error::NotFound` if either path does not exist
/// - `Error::Staging`, `Error::Schema`, `Error::Read`, `Error::Write` from
///   the corresponding step
pub fn sync_stores(primary_path: &Path, secondary_path: &Path) -> Result<SyncOutcome> {
    debug!(step = %SyncStep::StageCopies, "Staging store copies");
    let staged_primary = StagedCopy::create(primary_path)?;
    let staged_secondary = StagedCopy::create(secondary_path)?;

    // Any error from here on unwinds past the staged copies, deleting the
    // temp files without having touched either original.
    let outcome = run_staged(&staged_primary, &staged_secondary)?;

    debug!(step = %SyncStep::CommitOriginals, "Overwriting originals");
    staged_primary.commit_to_original()?;
    staged_secondary.commit_to_original()?;

    debug!(step = %SyncStep::Cleanup, "Removing staged copies");
    info!(
        "Synced {} records across {} and {}",
        outcome.synced,
        primary_path.display(),
        secondary_path.display()
    );
    Ok(outcome)
}

/// Run the staged-copy portion of a sync: validate, load, merge, write.
///
/// Connections are opened against the staged copies only and are closed
/// before this returns, so the caller may delete the underlying files.
fn run_staged(staged_primary: &StagedCopy, staged_secondary: &StagedCopy) -> Result<SyncOutcome> {
    let mut primary = Store::open(staged_primary.path())?;
    let mut secondary = Store::open(staged_secondary.path())?;

    // The primary's schema drives both stores; a secondary whose table lacks
    // one of these columns fails at the write step.
    let columns = table_columns(&primary)?;

    debug!(step = %SyncStep::Validate, "Deleting invalid records");
    let invalid_primary = delete_blank_principals(&primary)?;
    let invalid_secondary = delete_blank_principals(&secondary)?;

    debug!(step = %SyncStep::Load, "Loading records");
    let primary_records = load_records(&primary, &columns)?;
    let secondary_records = load_records(&secondary, &columns)?;

    debug!(step = %SyncStep::Merge, "Merging record sets");
    let merged = merge_record_sets(primary_records, secondary_records);
    let synced = merged.len();

    debug!(step = %SyncStep::WriteStaged, "Rewriting staged copies");
    replace_all(&mut secondary, &merged, &columns.insertable)?;
    replace_all(&mut primary, &merged, &columns.insertable)?;

    primary.close()?;
    secondary.close()?;

    Ok(SyncOutcome {
        invalid_primary,
        invalid_secondary,
        synced,
    })
}
