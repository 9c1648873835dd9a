//! `CounterStore` backed by a running server's REST API.
//!
//! The CLI keeps the record it fetched as its cached copy and sends sparse
//! updates computed from it, the same way any other client of the API does.

use async_trait::async_trait;
use mala_counter_core::{CounterRecord, SparseFieldMap, TrackedItem};
use mala_counter_http::{ImportResponse, MalaResponse};
use mala_counter_service::ExportFormat;
use mala_counter_storage::{CounterStore, StorageError};
use reqwest::{RequestBuilder, Response};
use serde_json::{Value, json};

pub(crate) struct RemoteStore {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteStore {
    pub(crate) fn new(endpoint: &str) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response =
            request.send().await.map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            return Err(StorageError::Rejected(error_message(&body).unwrap_or(body)));
        }
        Err(StorageError::Unavailable(format!("server returned {status}")))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StorageError> {
        response.json().await.map_err(|e| StorageError::DataCorruption {
            context: "decoding server response".to_owned(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn upload_image(
        &self,
        item: TrackedItem,
        payload: &str,
    ) -> Result<CounterRecord, StorageError> {
        let body = json!({"deityId": item.key(), "imageDataUrl": payload});
        let response = self.send(self.client.post(self.url("/api/deityImage")).json(&body)).await?;
        Ok(Self::decode::<MalaResponse>(response).await?.mala)
    }

    pub(crate) async fn clear_image(&self, item: TrackedItem) -> Result<CounterRecord, StorageError> {
        let url = self.url(&format!("/api/deityImage/{}", item.key()));
        let response = self.send(self.client.delete(url)).await?;
        Ok(Self::decode::<MalaResponse>(response).await?.mala)
    }

    pub(crate) async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, StorageError> {
        let url = self.url(&format!("/api/export/{}", format.extension()));
        let response = self.send(self.client.get(url)).await?;
        let bytes = response.bytes().await.map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Both outcomes of an import come back as an `ImportResponse`, so a 400
    /// here is decoded rather than turned into an error.
    pub(crate) async fn import(&self, text: String) -> Result<ImportResponse, StorageError> {
        let request = self
            .client
            .post(self.url("/api/importData"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(text);
        let response =
            request.send().await.map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let status = response.status();
        if status.is_server_error() {
            return Err(StorageError::Unavailable(format!("server returned {status}")));
        }
        Self::decode(response).await
    }
}

#[async_trait]
impl CounterStore for RemoteStore {
    async fn get(&self) -> Result<CounterRecord, StorageError> {
        let response = self.send(self.client.get(self.url("/api/mala"))).await?;
        Self::decode(response).await
    }

    async fn merge(&self, partial: &SparseFieldMap) -> Result<CounterRecord, StorageError> {
        tracing::debug!(fields = partial.len(), "Sending sparse update");
        let response = self.send(self.client.post(self.url("/api/mala")).json(partial)).await?;
        Self::decode(response).await
    }

    async fn reset_all(&self) -> Result<CounterRecord, StorageError> {
        let response = self.send(self.client.post(self.url("/api/mala/reset"))).await?;
        Self::decode(response).await
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mala_counter_core::{CounterField, FieldValue};
    use mala_counter_http::{AppState, Settings, create_router};
    use mala_counter_service::CounterService;
    use mala_counter_storage::MemStorage;

    use super::*;

    async fn spawn_server() -> (RemoteStore, Arc<MemStorage>) {
        let store = Arc::new(MemStorage::new());
        let router = create_router(Arc::new(AppState::new(store.clone(), Settings::default())));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (RemoteStore::new(&format!("http://{addr}/")), store)
    }

    #[tokio::test]
    async fn test_counter_service_over_http() {
        let (remote, server_store) = spawn_server().await;
        let remote = Arc::new(remote);
        let service = CounterService::new(remote.clone());

        let cached = remote.get().await.unwrap();
        let record = service.add_bulk(TrackedItem::GreenTara, 2, &cached).await.unwrap();
        assert_eq!(record.tally(TrackedItem::GreenTara).total_recitations, 216);

        let outcome = service.increment(TrackedItem::PRIMARY, &record).await.unwrap();
        assert_eq!(outcome.record.current_count, 1);
        assert_eq!(server_store.get().await.unwrap(), outcome.record);

        let reset = remote.reset_all().await.unwrap();
        assert_eq!(reset, CounterRecord::anonymous());
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let (remote, _) = spawn_server().await;
        let err = remote.upload_image(TrackedItem::Chenrezig, "nope").await.unwrap_err();
        let StorageError::Rejected(message) = err else {
            panic!("expected a rejection, got {err:?}");
        };
        assert!(message.contains("imageDataUrl"));
    }

    #[tokio::test]
    async fn test_image_upload_and_clear() {
        let (remote, _) = spawn_server().await;
        let payload = "data:image/png;base64,iVBORw0KGgo=";

        let record = remote.upload_image(TrackedItem::WhiteTara, payload).await.unwrap();
        assert_eq!(record.get(CounterField::ImageUrl(TrackedItem::WhiteTara)), FieldValue::Image(payload.to_owned()));

        let record = remote.clear_image(TrackedItem::WhiteTara).await.unwrap();
        assert_eq!(record.tally(TrackedItem::WhiteTara).image_url, "");
    }

    #[tokio::test]
    async fn test_export_then_import_over_http() {
        let (remote, server_store) = spawn_server().await;
        remote
            .merge(&SparseFieldMap::new().with_count(TrackedItem::Manjushri.completed_field(), 4))
            .await
            .unwrap();

        let exported = remote.export(ExportFormat::Json).await.unwrap();
        remote.reset_all().await.unwrap();
        let response = remote.import(String::from_utf8(exported).unwrap()).await.unwrap();

        assert!(response.success);
        assert_eq!(server_store.get().await.unwrap().tally(TrackedItem::Manjushri).completed_malas, 4);

        let response = remote.import(r#"{"nothing": 1}"#.to_owned()).await.unwrap();
        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let remote = RemoteStore::new("http://127.0.0.1:1");
        let err = remote.get().await.unwrap_err();
        assert!(err.is_transient());
    }
}
