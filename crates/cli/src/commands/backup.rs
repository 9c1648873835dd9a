use anyhow::{Result, bail};
use mala_counter_service::ExportFormat;
use std::path::{Path, PathBuf};

use crate::remote::RemoteStore;

pub(crate) async fn export(
    store: &RemoteStore,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let bytes = store.export(format).await?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(format.file_name(chrono::Local::now().date_naive())));
    tokio::fs::write(&path, &bytes).await?;
    tracing::info!(bytes = bytes.len(), "Wrote export");
    println!("{}", path.display());
    Ok(())
}

pub(crate) async fn import(store: &RemoteStore, path: &Path) -> Result<()> {
    let text = tokio::fs::read_to_string(path).await?;
    let response = store.import(text).await?;
    if !response.success {
        bail!(response.message.unwrap_or_else(|| "import failed".to_owned()));
    }
    println!("Imported {} fields", response.imported.len());
    Ok(())
}
