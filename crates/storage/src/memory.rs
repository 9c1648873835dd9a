//! Process-memory store. State does not survive a restart.

use std::sync::Arc;

use async_trait::async_trait;
use mala_counter_core::{CounterRecord, SparseFieldMap};
use tokio::sync::RwLock;

use crate::{CounterStore, StorageError};

#[derive(Clone, Debug, Default)]
pub struct MemStorage {
    record: Arc<RwLock<CounterRecord>>,
}

impl MemStorage {
    /// A store holding a freshly reset anonymous record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with an existing record.
    #[must_use]
    pub fn with_record(record: CounterRecord) -> Self {
        Self { record: Arc::new(RwLock::new(record)) }
    }
}

#[async_trait]
impl CounterStore for MemStorage {
    async fn get(&self) -> Result<CounterRecord, StorageError> {
        Ok(self.record.read().await.clone())
    }

    async fn merge(&self, partial: &SparseFieldMap) -> Result<CounterRecord, StorageError> {
        let mut record = self.record.write().await;
        record.merge(partial);
        tracing::debug!(fields = ?partial.field_names(), "merged counter fields");
        Ok(record.clone())
    }

    async fn reset_all(&self) -> Result<CounterRecord, StorageError> {
        let mut record = self.record.write().await;
        let id = record.id;
        *record = CounterRecord::anonymous();
        record.id = id;
        tracing::info!(id, "counter record reset");
        Ok(record.clone())
    }
}
