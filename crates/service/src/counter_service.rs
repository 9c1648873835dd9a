//! Per-item counter updates.
//!
//! Every operation computes new values from the caller's cached copy of the
//! record and issues exactly one merge; the store is not re-read first. Two
//! callers updating the same item from stale copies therefore race, and the
//! last write wins on the touched fields.

use mala_counter_core::{
    CounterField, CounterRecord, IMAGE_DATA_URL_PREFIX, MALA_SIZE, MIN_IMAGE_PAYLOAD_LEN,
    SparseFieldMap, TrackedItem,
};
use mala_counter_storage::SharedStore;

use crate::ServiceError;

/// Result of a single-recitation increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementOutcome {
    pub record: CounterRecord,
    /// The increment finished a mala; the UI shows its celebration prompt.
    pub mala_completed: bool,
}

pub struct CounterService {
    store: SharedStore,
}

impl CounterService {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn record(&self) -> Result<CounterRecord, ServiceError> {
        Ok(self.store.get().await?)
    }

    /// Apply an already validated sparse update.
    pub async fn update(&self, partial: &SparseFieldMap) -> Result<CounterRecord, ServiceError> {
        Ok(self.store.merge(partial).await?)
    }

    pub async fn reset_all(&self) -> Result<CounterRecord, ServiceError> {
        Ok(self.store.reset_all().await?)
    }

    /// Advance the live counter by one recitation.
    ///
    /// Only the primary item has a live counter; the others are bulk-only.
    pub async fn increment(
        &self,
        item: TrackedItem,
        cached: &CounterRecord,
    ) -> Result<IncrementOutcome, ServiceError> {
        let (delta, mala_completed) = increment_delta(item, cached)?;
        let record = self.store.merge(&delta).await?;
        if mala_completed {
            tracing::info!(
                item = %item,
                completed = record.tally(item).completed_malas,
                "mala completed"
            );
        }
        Ok(IncrementOutcome { record, mala_completed })
    }

    /// Add `n` whole malas. `n <= 0` is a no-op that returns the cached record.
    pub async fn add_bulk(
        &self,
        item: TrackedItem,
        n: i64,
        cached: &CounterRecord,
    ) -> Result<CounterRecord, ServiceError> {
        match bulk_delta(item, n, cached)? {
            Some(delta) => Ok(self.store.merge(&delta).await?),
            None => Ok(cached.clone()),
        }
    }

    /// Zero the item's completed malas and recitations.
    pub async fn reset(&self, item: TrackedItem) -> Result<CounterRecord, ServiceError> {
        tracing::info!(item = %item, "resetting item tallies");
        Ok(self.store.merge(&reset_delta(item)).await?)
    }

    /// Store an uploaded icon payload verbatim.
    pub async fn set_image(
        &self,
        item: TrackedItem,
        payload: &str,
    ) -> Result<CounterRecord, ServiceError> {
        validate_image_payload(payload)?;
        let mut delta = SparseFieldMap::new();
        delta.set_image(item, payload);
        tracing::debug!(item = %item, bytes = payload.len(), "storing custom image");
        Ok(self.store.merge(&delta).await?)
    }

    /// Revert the item to its default icon.
    pub async fn clear_image(&self, item: TrackedItem) -> Result<CounterRecord, ServiceError> {
        let mut delta = SparseFieldMap::new();
        delta.set_image(item, "");
        Ok(self.store.merge(&delta).await?)
    }
}

/// Fields to merge for one increment, and whether it completed a mala.
pub fn increment_delta(
    item: TrackedItem,
    cached: &CounterRecord,
) -> Result<(SparseFieldMap, bool), ServiceError> {
    if !item.is_primary() {
        return Err(ServiceError::UnsupportedOperation(format!(
            "{item} has no live counter; add whole malas instead"
        )));
    }

    let next = cached.current_count.saturating_add(1);
    let mut delta = SparseFieldMap::new();
    if next < MALA_SIZE {
        delta.set_count(CounterField::CurrentCount, next);
        return Ok((delta, false));
    }

    let tally = cached.tally(item);
    delta
        .set_count(CounterField::CurrentCount, 0)
        .set_count(item.completed_field(), tally.completed_malas.saturating_add(1))
        .set_count(item.recitations_field(), tally.total_recitations.saturating_add(MALA_SIZE));
    Ok((delta, true))
}

/// Fields to merge for adding `n` malas, or `None` when `n <= 0`.
pub fn bulk_delta(
    item: TrackedItem,
    n: i64,
    cached: &CounterRecord,
) -> Result<Option<SparseFieldMap>, ServiceError> {
    let Ok(n) = u64::try_from(n) else {
        return Ok(None);
    };
    if n == 0 {
        return Ok(None);
    }

    let too_large = || ServiceError::InvalidInput(format!("cannot add {n} malas"));
    let tally = cached.tally(item);
    let completed = tally.completed_malas.checked_add(n).ok_or_else(too_large)?;
    let recitations = n
        .checked_mul(MALA_SIZE)
        .and_then(|added| tally.total_recitations.checked_add(added))
        .ok_or_else(too_large)?;

    let delta = SparseFieldMap::new()
        .with_count(item.completed_field(), completed)
        .with_count(item.recitations_field(), recitations);
    Ok(Some(delta))
}

/// Fields to merge for a per-item reset.
#[must_use]
pub fn reset_delta(item: TrackedItem) -> SparseFieldMap {
    SparseFieldMap::new()
        .with_count(item.completed_field(), 0)
        .with_count(item.recitations_field(), 0)
}

/// Only a MIME-type prefix check; the payload is otherwise opaque.
pub fn validate_image_payload(payload: &str) -> Result<(), ServiceError> {
    if payload.len() < MIN_IMAGE_PAYLOAD_LEN {
        return Err(ServiceError::InvalidInput(format!(
            "imageDataUrl must be at least {MIN_IMAGE_PAYLOAD_LEN} characters"
        )));
    }
    if !payload.starts_with(IMAGE_DATA_URL_PREFIX) {
        return Err(ServiceError::InvalidInput(format!(
            "imageDataUrl must start with {IMAGE_DATA_URL_PREFIX}"
        )));
    }
    Ok(())
}
