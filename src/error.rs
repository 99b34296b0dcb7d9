//! Error type for trie lookups and facade queries.

use thiserror::Error;

/// Errors returned by trie lookups and the matching facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested key is not stored in the trie.
    ///
    /// Returned by `value()` on a node that only exists as a branching point
    /// and by direct key lookups of absent keys.
    #[error("key {key:?} not found in trie")]
    NotFound { key: String },

    /// A query relied on the default threshold, but none was configured.
    #[error("no default threshold configured")]
    MissingThreshold,
}

impl Error {
    pub fn not_found(key: impl Into<String>) -> Error {
        Error::NotFound { key: key.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
