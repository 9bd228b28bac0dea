// Consul KV wire models

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use confreg_common::BackendError;

/// Consul KV Pair as returned by `GET /v1/kv/<key>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KVPair {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "CreateIndex", default)]
    pub create_index: u64,

    #[serde(rename = "ModifyIndex", default)]
    pub modify_index: u64,

    #[serde(rename = "LockIndex", default)]
    pub lock_index: u64,

    #[serde(rename = "Flags", default)]
    pub flags: u64,

    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>, // Base64 encoded

    #[serde(rename = "Session", default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl KVPair {
    /// Decode the base64 value; a null value is an empty one
    pub fn raw_value(&self) -> Result<Vec<u8>, BackendError> {
        match &self.value {
            None => Ok(Vec::new()),
            Some(encoded) => BASE64.decode(encoded).map_err(|e| {
                BackendError::Encoding(format!("value of '{}' is not base64: {}", self.key, e))
            }),
        }
    }
}
