//! Runtime schema discovery for the credential table.

use tracing::debug;

use credsync_common::{Error, Result};

use crate::store::Store;
use crate::{LOGINS_TABLE, ROWID_COLUMN};

/// Column sets of the credential table, discovered at runtime.
///
/// The engine is schema-agnostic beyond the fixed identity columns: whatever
/// payload columns a profile carries are preserved through merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    /// Every column, in table order. Used for SELECTs.
    pub all: Vec<String>,
    /// Every column except the auto-assigned row id. Used for INSERTs.
    pub insertable: Vec<String>,
}

/// Discover the ordered column set of the `logins` table.
///
/// Read-only metadata query.
///
/// # Errors
/// - `Error::Schema` if the table is missing or reports no columns
pub fn table_columns(store: &Store) -> Result<TableColumns> {
    let mut stmt = store
        .conn()
        .prepare(&format!("PRAGMA table_info({})", LOGINS_TABLE))
        .map_err(|e| Error::Schema(e.to_string()))?;

    // Column 1 of table_info output is the column name.
    let all: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| Error::Schema(e.to_string()))?
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| Error::Schema(e.to_string()))?;

    if all.is_empty() {
        return Err(Error::Schema(format!(
            "table '{}' not found in {}",
            LOGINS_TABLE,
            store.path().display()
        )));
    }

    let insertable = all
        .iter()
        .filter(|col| col.as_str() != ROWID_COLUMN)
        .cloned()
        .collect();

    debug!("Discovered {} columns in {}", all.len(), LOGINS_TABLE);
    Ok(TableColumns { all, insertable })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_schema() -> Store {
        let store = Store::in_memory().unwrap();
        store
            .conn()
            .execute_batch(
                r#"
                CREATE TABLE logins (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    origin_url TEXT,
                    signon_realm TEXT NOT NULL,
                    username_value TEXT,
                    password_value BLOB,
                    date_created INTEGER
                );
                "#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_discovers_all_columns_in_order() {
        let store = store_with_schema();
        let columns = table_columns(&store).unwrap();
        assert_eq!(
            columns.all,
            vec![
                "id",
                "origin_url",
                "signon_realm",
                "username_value",
                "password_value",
                "date_created"
            ]
        );
    }

    #[test]
    fn test_insertable_excludes_row_id() {
        let store = store_with_schema();
        let columns = table_columns(&store).unwrap();
        assert!(!columns.insertable.contains(&"id".to_string()));
        assert_eq!(columns.insertable.len(), columns.all.len() - 1);
    }

    #[test]
    fn test_missing_table_is_schema_error() {
        let store = Store::in_memory().unwrap();
        let err = table_columns(&store).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
