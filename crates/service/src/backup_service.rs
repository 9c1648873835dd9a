//! Export and import against the store, bypassing the per-item update logic.

use chrono::{DateTime, Utc};
use mala_counter_core::CounterRecord;
use mala_counter_storage::SharedStore;

use crate::ServiceError;
use crate::backup::{self, ExportFormat};

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Recognized fields were merged.
    Imported { record: CounterRecord, fields: Vec<&'static str> },
    /// Parsed fine but carried no recognized field; the store was not touched.
    NothingToImport,
}

pub struct BackupService {
    store: SharedStore,
}

impl BackupService {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Encode the current record in `format`, stamping JSON with `now`.
    pub async fn export(
        &self,
        format: ExportFormat,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, ServiceError> {
        let record = self.store.get().await?;
        let bytes = match format {
            ExportFormat::Json => backup::export_structured(&record, now)?.into_bytes(),
            ExportFormat::Xlsx => backup::export_tabular(&record)?,
        };
        tracing::info!(format = format.extension(), bytes = bytes.len(), "exported backup");
        Ok(bytes)
    }

    /// Parse a structured backup and merge its recognized fields in one step.
    ///
    /// Malformed payloads fail before anything is merged.
    pub async fn import(&self, payload: &[u8]) -> Result<ImportOutcome, ServiceError> {
        let partial = backup::import_structured(payload).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected backup import");
        })?;
        if partial.is_empty() {
            tracing::warn!("backup contained no recognized fields");
            return Ok(ImportOutcome::NothingToImport);
        }

        let fields = partial.field_names();
        let record = self.store.merge(&partial).await?;
        tracing::info!(fields = fields.len(), "imported backup");
        Ok(ImportOutcome::Imported { record, fields })
    }
}
