//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`KeyValueStore`](super::KeyValueStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the stored map failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The backing data is not a JSON object of strings
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The store cannot be used at all (e.g. a poisoned lock)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
