//! In-memory representation of credential records.

use rusqlite::types::Value;
use std::collections::HashMap;

use credsync_common::IdentityKey;

use crate::{PRINCIPAL_COLUMN, REALM_COLUMN};

/// One saved-credential row: a mapping from column name to value.
///
/// Only the identity columns are interpreted; every other column is opaque
/// payload (secret material, timestamps, usage counters) carried through
/// a merge unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: HashMap<String, Value>,
}

/// A keyed collection of records. Keys are unique; the value is the
/// most-recently-accepted record for that key. No ordering is guaranteed.
pub type RecordSet = HashMap<IdentityKey, Record>;

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    /// Set a column value, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.columns.insert(column.into(), value);
    }

    /// Get a column value, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Derive this record's identity key from its identity columns.
    ///
    /// An absent, NULL, or non-text identity column yields an empty string,
    /// so malformed rows still get a deterministic (and collidable) key. A
    /// NULL realm therefore shares a key with an empty-string realm; only
    /// one such row survives a merge. Principals never reach this code as
    /// NULL — the validity filter deletes those rows first.
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(self.text_or_empty(REALM_COLUMN), self.text_or_empty(PRINCIPAL_COLUMN))
    }

    fn text_or_empty(&self, column: &str) -> String {
        match self.columns.get(column) {
            Some(Value::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
