//! Common types used throughout CredSync.

use std::fmt;

/// Identity of a saved credential across stores.
///
/// Two records with the same (realm, principal) pair are the same credential;
/// only one survives a merge. Either half may be empty — rows missing an
/// identity column are keyed with an empty string rather than rejected, so
/// malformed rows still receive a deterministic, collidable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    /// The site/origin the credential applies to.
    pub realm: String,
    /// The account identifier, e.g. username.
    pub principal: String,
}

impl IdentityKey {
    /// Create a new identity key.
    pub fn new(realm: impl Into<String>, principal: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            principal: principal.into(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.realm, self.principal)
    }
}
