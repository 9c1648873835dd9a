use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mala_counter_core::TrackedItem;
use std::path::Path;

use crate::remote::RemoteStore;

pub(crate) async fn set(store: &RemoteStore, item: TrackedItem, path: &Path) -> Result<()> {
    let mime = image_mime(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let payload = data_url(&mime, &bytes);
    store.upload_image(item, &payload).await?;
    println!("Custom image set for {}", item.name());
    Ok(())
}

pub(crate) async fn clear(store: &RemoteStore, item: TrackedItem) -> Result<()> {
    store.clear_image(item).await?;
    println!("Default image restored for {}", item.name());
    Ok(())
}

fn image_mime(path: &Path) -> Result<String> {
    let Some(mime) = mime_guess::from_path(path).first() else {
        bail!("cannot tell the image type of {}", path.display());
    };
    if mime.type_() != mime_guess::mime::IMAGE {
        bail!("{} is not an image ({mime})", path.display());
    }
    Ok(mime.essence_str().to_owned())
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
