//! Transactional replace-all writes of a merged record set.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, TransactionBehavior};
use tracing::debug;

use credsync_common::{Error, Result};

use crate::loader::quote_ident;
use crate::record::RecordSet;
use crate::store::Store;
use crate::LOGINS_TABLE;

/// Replace the entire record table with the given record set.
///
/// Runs as one transaction: full table clear, then one INSERT per record
/// with identity-free columns mapped from the record (missing columns write
/// as NULL). All rows are visible to a later reader, or none. The row id is
/// reassigned by the database.
///
/// Returns the number of records written.
///
/// # Errors
/// - `Error::Write` on any store-write failure; the transaction rolls back
pub fn replace_all(
    store: &mut Store,
    records: &RecordSet,
    insertable_columns: &[String],
) -> Result<usize> {
    let path = store.path().to_path_buf();
    let tx = store
        .conn_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| Error::Write(e.to_string()))?;

    tx.execute(&format!("DELETE FROM {}", LOGINS_TABLE), [])
        .map_err(|e| Error::Write(e.to_string()))?;

    let column_list = insertable_columns
        .iter()
        .map(|col| quote_ident(col))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=insertable_columns.len())
        .map(|n| format!("?{}", n))
        .collect::<Vec<_>>()
        .join(", ");

    {
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {} ({}) VALUES ({})",
                LOGINS_TABLE, column_list, placeholders
            ))
            .map_err(|e| Error::Write(e.to_string()))?;

        for record in records.values() {
            let values = insertable_columns
                .iter()
                .map(|col| record.get(col).cloned().unwrap_or(Value::Null));
            stmt.execute(params_from_iter(values))
                .map_err(|e| Error::Write(e.to_string()))?;
        }
    }

    tx.commit().map_err(|e| Error::Write(e.to_string()))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(records.len())
}
