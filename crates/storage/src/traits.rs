//! Storage backend trait abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use mala_counter_core::{CounterRecord, SparseFieldMap};

use crate::StorageError;

/// Holder of the single counter record.
///
/// Each operation is one indivisible step relative to every other operation.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current record.
    async fn get(&self) -> Result<CounterRecord, StorageError>;

    /// Overwrite every field present in `partial`, leave the rest untouched,
    /// and return the full record after the merge.
    async fn merge(&self, partial: &SparseFieldMap) -> Result<CounterRecord, StorageError>;

    /// Replace the record with the all-zero default, keeping its identity.
    async fn reset_all(&self) -> Result<CounterRecord, StorageError>;
}

/// Store handle shared between services and handlers.
pub type SharedStore = Arc<dyn CounterStore>;
