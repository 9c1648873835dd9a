//! Typed error enum for the storage layer.

use thiserror::Error;

/// Storage-layer error covering every expected failure mode.
///
/// The in-memory store never fails; remote stores surface transport and
/// rejection failures through the same type.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the write (validation failure on the far side).
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// Stored or transferred data could not be decoded into a record.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying by the user).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
