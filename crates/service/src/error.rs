//! Typed error enum for the service layer.

use mala_counter_core::CoreError;
use mala_counter_storage::StorageError;
use thiserror::Error;

use crate::backup::{ExportError, ImportError};

/// Service-layer error unifying validation, storage and backup failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided input that does not match the field/shape contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Item identifier outside the fixed set of tracked items.
    #[error("invalid deity ID: {0}")]
    UnrecognizedItem(String),

    /// Operation exists but is not offered for this item.
    #[error("unsupported: {0}")]
    UnsupportedOperation(String),

    /// Backup payload could not be parsed.
    #[error("import: {0}")]
    Import(#[from] ImportError),

    /// Backup file could not be produced.
    #[error("export: {0}")]
    Export(#[from] ExportError),
}

impl ServiceError {
    /// Whether this error is likely transient (worth re-triggering).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether the caller is at fault (400-class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::UnrecognizedItem(_)
                | Self::UnsupportedOperation(_)
                | Self::Import(_)
        )
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnrecognizedItem(key) => Self::UnrecognizedItem(key),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
