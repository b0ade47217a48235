//! CredSync store layer.
//!
//! This module provides read/write access to a credential store (a Chromium
//! profile `Login Data` SQLite file), including:
//! - A `Store` handle wrapping a single database connection
//! - Runtime schema discovery for the `logins` table
//! - Removal of structurally invalid records before merge
//! - Loading all records into a keyed in-memory collection
//! - Transactional replace-all writes of a merged record set

pub mod filter;
pub mod loader;
pub mod record;
pub mod schema;
pub mod store;
pub mod writer;

// Re-export main types
pub use filter::delete_blank_principals;
pub use loader::load_records;
pub use record::{Record, RecordSet};
pub use schema::{table_columns, TableColumns};
pub use store::Store;
pub use writer::replace_all;

/// Name of the credential record table.
pub const LOGINS_TABLE: &str = "logins";

/// Column holding the site/origin the credential applies to.
pub const REALM_COLUMN: &str = "signon_realm";

/// Column holding the account identifier.
pub const PRINCIPAL_COLUMN: &str = "username_value";

/// Auto-assigned row identifier column, excluded from INSERTs.
pub const ROWID_COLUMN: &str = "id";
