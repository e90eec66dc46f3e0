//! Error types for the store layer.
//!
//! All failures are propagated via [`StoreError`], which keeps the path of
//! the file involved so log lines and 500 responses say which collection
//! broke.

use std::path::PathBuf;

use zookeepr_types::Violations;

/// Errors that can occur while loading or growing a collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the collection file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The collection file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The collection file parsed as JSON but has the wrong shape.
    #[error("malformed collection file {}: {message}", path.display())]
    Malformed {
        /// The collection file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A candidate record failed its schema.
    #[error("the {noun} is not properly formatted: {violations}")]
    Invalid {
        /// Singular noun of the record kind (`animal`, `zookeeper`).
        noun: &'static str,
        /// Every field that failed.
        violations: Violations,
    },

    /// The id counter cannot advance any further.
    #[error("no identifiers left in the {collection} collection")]
    IdsExhausted {
        /// The collection name.
        collection: &'static str,
    },
}
