use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A property display name has no entry in the static field table.
    #[error("Provided property key is not valid: {name:?}")]
    InvalidPropertyKey { name: String },
}

/// Errors raised while loading a [`Datastore`](crate::datastore::Datastore).
#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("failed to read datastore {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse datastore: {0}")]
    Json(#[from] serde_json::Error),

    /// The datastore parsed but its catalog does not normalise.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
