use anyhow::{Result, bail};
use mala_counter_core::{CounterRecord, MALA_SIZE, TrackedItem};
use mala_counter_service::CounterService;
use mala_counter_storage::CounterStore;
use std::sync::Arc;

use crate::remote::RemoteStore;

pub(crate) async fn show(store: &RemoteStore) -> Result<()> {
    let record = store.get().await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub(crate) fn items() -> Result<()> {
    for item in TrackedItem::ALL {
        let descriptor = item.descriptor();
        println!("{:<16} {}", descriptor.key, descriptor.title);
    }
    Ok(())
}

pub(crate) async fn increment(store: RemoteStore, item: TrackedItem) -> Result<()> {
    let store = Arc::new(store);
    let cached = store.get().await?;
    let outcome = CounterService::new(store).increment(item, &cached).await?;
    let tally = outcome.record.tally(item);
    if outcome.mala_completed {
        println!(
            "Mala completed! {}: {} malas, {} recitations",
            item.name(),
            tally.completed_malas,
            tally.total_recitations
        );
    } else {
        println!("{}: {}/{}", item.name(), outcome.record.current_count, MALA_SIZE);
    }
    Ok(())
}

pub(crate) async fn add(store: RemoteStore, item: TrackedItem, count: i64) -> Result<()> {
    let store = Arc::new(store);
    let cached = store.get().await?;
    let record = CounterService::new(store).add_bulk(item, count, &cached).await?;
    print_tally(&record, item);
    Ok(())
}

pub(crate) async fn reset(store: RemoteStore, item: TrackedItem) -> Result<()> {
    let record = CounterService::new(Arc::new(store)).reset(item).await?;
    print_tally(&record, item);
    Ok(())
}

pub(crate) async fn reset_all(store: &RemoteStore, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("reset-all clears every counter and image; pass --yes to confirm");
    }
    store.reset_all().await?;
    println!("All counters reset");
    Ok(())
}

fn print_tally(record: &CounterRecord, item: TrackedItem) {
    let tally = record.tally(item);
    println!(
        "{}: {} malas, {} recitations",
        item.name(),
        tally.completed_malas,
        tally.total_recitations
    );
}
