//! Loading all records from a store into a keyed collection.

use rusqlite::types::Value;
use tracing::debug;

use credsync_common::{Error, Result};

use crate::record::{Record, RecordSet};
use crate::schema::TableColumns;
use crate::store::Store;
use crate::LOGINS_TABLE;

/// Quote an identifier for embedding in SQL text.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Read every remaining record and key it by (realm, principal).
///
/// Columns are selected by name (not `SELECT *`) so value positions are tied
/// to the inspected schema. A later record with a duplicate key replaces the
/// earlier one, matching the keyed-collection invariant.
///
/// # Errors
/// - `Error::Read` on any store-read failure
pub fn load_records(store: &Store, columns: &TableColumns) -> Result<RecordSet> {
    let column_list = columns
        .all
        .iter()
        .map(|col| quote_ident(col))
        .collect::<Vec<_>>()
        .join(", ");

    let mut stmt = store
        .conn()
        .prepare(&format!("SELECT {} FROM {}", column_list, LOGINS_TABLE))
        .map_err(|e| Error::Read(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let mut record = Record::new();
            for (idx, name) in columns.all.iter().enumerate() {
                record.set(name.clone(), row.get::<_, Value>(idx)?);
            }
            Ok(record)
        })
        .map_err(|e| Error::Read(e.to_string()))?;

    let mut records = RecordSet::new();
    for row in rows {
        let record = row.map_err(|e| Error::Read(e.to_string()))?;
        records.insert(record.identity_key(), record);
    }

    debug!(
        "Loaded {} records from {}",
        records.len(),
        store.path().display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::table_columns;
    use credsync_common::IdentityKey;

    fn seeded_store() -> Store {
        let store = Store::in_memory().unwrap();
        store
            .conn()
            .execute_batch(
                r#"
                CREATE TABLE logins (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    signon_realm TEXT NOT NULL,
                    username_value TEXT,
                    password_value BLOB,
                    date_created INTEGER
                );
                INSERT INTO logins (signon_realm, username_value, password_value, date_created)
                VALUES ('https://a.com/', 'u1', x'AABB', 100);
                INSERT INTO logins (signon_realm, username_value, password_value, date_created)
                VALUES ('https://b.com/', 'u2', x'CCDD', 200);
                "#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_loads_all_records_keyed() {
        let store = seeded_store();
        let columns = table_columns(&store).unwrap();
        let records = load_records(&store, &columns).unwrap();

        assert_eq!(records.len(), 2);
        let record = &records[&IdentityKey::new("https://a.com/", "u1")];
        assert_eq!(record.get("password_value"), Some(&Value::Blob(vec![0xaa, 0xbb])));
        assert_eq!(record.get("date_created"), Some(&Value::Integer(100)));
    }

    #[test]
    fn test_missing_realm_column_defaults_key_to_empty() {
        let store = Store::in_memory().unwrap();
        store
            .conn()
            .execute_batch(
                r#"
                CREATE TABLE logins (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username_value TEXT
                );
                INSERT INTO logins (username_value) VALUES ('u1');
                INSERT INTO logins (username_value) VALUES ('u1');
                "#,
            )
            .unwrap();

        let columns = table_columns(&store).unwrap();
        let records = load_records(&store, &columns).unwrap();

        // Both rows collide into the ("", "u1") key; one survives.
        assert_eq!(records.len(), 1);
        assert!(records.contains_key(&IdentityKey::new("", "u1")));
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let store = seeded_store();
        store
            .conn()
            .execute(
                "INSERT INTO logins (signon_realm, username_value, password_value, date_created) \
                 VALUES ('https://a.com/', 'u1', x'EEFF', 300)",
                [],
            )
            .unwrap();

        let columns = table_columns(&store).unwrap();
        let records = load_records(&store, &columns).unwrap();
        assert_eq!(records.len(), 2);
    }
}
