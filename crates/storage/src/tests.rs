//! Tests for the in-memory counter store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use mala_counter_core::{CounterField, CounterRecord, FieldValue, SparseFieldMap, TrackedItem};

use crate::{CounterStore, MemStorage, SharedStore};

fn seeded_record() -> CounterRecord {
    let mut record = CounterRecord::anonymous();
    record.current_count = 42;
    for (n, item) in (1_u64..).zip(TrackedItem::ALL) {
        let tally = record.tally_mut(item);
        tally.completed_malas = n;
        tally.total_recitations = n * 108;
        tally.image_url = format!("data:image/png;base64,{n}");
    }
    record
}

#[tokio::test]
async fn test_new_store_holds_default_record() {
    let store = MemStorage::new();
    assert_eq!(store.get().await.unwrap(), CounterRecord::anonymous());
}

#[tokio::test]
async fn test_merge_returns_full_record() {
    let store = MemStorage::new();
    let partial = SparseFieldMap::new()
        .with_count(CounterField::CurrentCount, 12)
        .with_count(TrackedItem::GreenTara.completed_field(), 3);

    let merged = store.merge(&partial).await.unwrap();

    assert_eq!(merged.current_count, 12);
    assert_eq!(merged.tally(TrackedItem::GreenTara).completed_malas, 3);
    assert_eq!(store.get().await.unwrap(), merged);
}

#[tokio::test]
async fn test_merge_leaves_other_fields_unchanged() {
    let store = MemStorage::with_record(seeded_record());
    let target = TrackedItem::Vajrasattva.recitations_field();

    let merged = store.merge(&SparseFieldMap::new().with_count(target, 7)).await.unwrap();

    let before = seeded_record();
    for field in CounterField::all() {
        if field == target {
            assert_eq!(merged.get(field), FieldValue::Count(7));
        } else {
            assert_eq!(merged.get(field), before.get(field), "{field} changed");
        }
    }
}

#[tokio::test]
async fn test_empty_merge_is_noop() {
    let store = MemStorage::with_record(seeded_record());
    let merged = store.merge(&SparseFieldMap::new()).await.unwrap();
    assert_eq!(merged, seeded_record());
}

#[tokio::test]
async fn test_image_merge_stores_payload_verbatim() {
    let store = MemStorage::new();
    let payload = "data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=";
    let mut partial = SparseFieldMap::new();
    partial.set_image(TrackedItem::Chenrezig, payload);

    let merged = store.merge(&partial).await.unwrap();

    assert_eq!(merged.tally(TrackedItem::Chenrezig).image_url, payload);
    assert_eq!(merged.tally(TrackedItem::Chenrezig).completed_malas, 0);
}

#[tokio::test]
async fn test_reset_all_restores_default_and_keeps_identity() {
    let mut seeded = seeded_record();
    seeded.id = 7;
    let store = MemStorage::with_record(seeded);

    let reset = store.reset_all().await.unwrap();

    let mut expected = CounterRecord::anonymous();
    expected.id = 7;
    assert_eq!(reset, expected);
    assert_eq!(store.get().await.unwrap(), expected);
}

#[tokio::test]
async fn test_clones_share_one_record() {
    let store = MemStorage::new();
    let shared: SharedStore = Arc::new(store.clone());

    shared.merge(&SparseFieldMap::new().with_count(CounterField::CurrentCount, 3)).await.unwrap();

    assert_eq!(store.get().await.unwrap().current_count, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_merges_on_distinct_fields_all_land() {
    let store: SharedStore = Arc::new(MemStorage::new());
    let mut handles = Vec::new();
    for (n, item) in (1_u64..).zip(TrackedItem::ALL) {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let partial = SparseFieldMap::new().with_count(item.completed_field(), n);
            store.merge(&partial).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let record = store.get().await.unwrap();
    for (n, item) in (1_u64..).zip(TrackedItem::ALL) {
        assert_eq!(record.tally(item).completed_malas, n);
    }
}
