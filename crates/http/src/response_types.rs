//! JSON response bodies.

use mala_counter_core::CounterRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MalaResponse {
    pub success: bool,
    pub mala: CounterRecord,
}

/// Import result. Soft failures still answer with a JSON body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mala: Option<CounterRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imported: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportResponse {
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, mala: None, imported: Vec::new(), message: Some(message.into()) }
    }
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
