//! Request types (Deserialize)

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadRequest {
    pub deity_id: String,
    /// Opaque image-as-text payload, normally a base64 data URL.
    pub image_data_url: String,
}
