//! Removal of structurally invalid records before merge.

use tracing::debug;

use credsync_common::{Error, Result};

use crate::store::Store;
use crate::{LOGINS_TABLE, PRINCIPAL_COLUMN};

/// Delete every record whose principal is NULL or blank after trimming.
///
/// Returns the number of records removed. This is a destructive, committed
/// mutation on the staged copy; it is durable before loading so the loader
/// never observes invalid rows. The staged-copy protocol is the rollback
/// boundary, not this statement.
pub fn delete_blank_principals(store: &Store) -> Result<usize> {
    let deleted = store
        .conn()
        .execute(
            &format!(
                "DELETE FROM {table} WHERE {principal} IS NULL OR TRIM({principal}) = ''",
                table = LOGINS_TABLE,
                principal = PRINCIPAL_COLUMN,
            ),
            [],
        )
        .map_err(|e| Error::Write(e.to_string()))?;

    debug!(
        "Deleted {} invalid records from {}",
        deleted,
        store.path().display()
    );
    Ok(deleted)
}
