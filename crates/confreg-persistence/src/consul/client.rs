//! Consul KV backend
//!
//! Maps the [`Backend`] operations onto the Consul KV HTTP API:
//! - `put` / `put_if_absent`: `PUT /v1/kv/<key>` (`?cas=0` for create-only)
//! - `get`: `GET /v1/kv/<key>`, 404 means absent
//! - `delete`: `DELETE /v1/kv/<key>`, 404 tolerated
//! - `list`: `GET /v1/kv/<prefix>?recurse=true`, 404 means empty
//!
//! Requests are not retried; failures surface as [`BackendError`].

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use tracing::{debug, warn};

use confreg_common::BackendError;

use super::config::ConsulConfig;
use super::model::KVPair;
use super::{KV_PATH, STATUS_LEADER_PATH, TOKEN_HEADER};
use crate::traits::Backend;

fn network_error(err: reqwest::Error) -> BackendError {
    BackendError::Network(err.to_string())
}

/// Backend over a Consul agent's KV store
pub struct ConsulBackend {
    client: Client,
    config: ConsulConfig,
    base_url: Url,
}

impl ConsulBackend {
    /// Create a new backend with the given configuration
    pub fn new(config: ConsulConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()
            .map_err(network_error)?;

        let base_url = Url::parse(&config.address).map_err(|e| {
            BackendError::Network(format!("invalid Consul address '{}': {}", config.address, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Network(format!(
                "invalid Consul address '{}'",
                config.address
            )));
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build `<address>/<api_path>/<key>`, percent-encoding each key segment
    fn url(&self, api_path: &str, key: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                BackendError::Network(format!("invalid Consul address '{}'", self.config.address))
            })?;
            segments.pop_if_empty();
            segments.extend(api_path.split('/'));
            if !key.is_empty() {
                segments.extend(key.split('/'));
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.config.token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        if let Some(dc) = &self.config.datacenter {
            builder = builder.query(&[("dc", dc.as_str())]);
        }
        builder
    }

    async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
        builder.send().await.map_err(network_error)
    }

    async fn status_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, body = %body, "Consul request failed");
        BackendError::Status { status, body }
    }

    async fn read_pairs(response: Response) -> Result<Vec<KVPair>, BackendError> {
        let body = response.bytes().await.map_err(network_error)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Backend for ConsulBackend {
    fn name(&self) -> &'static str {
        "consul"
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<String, BackendError> {
        let url = self.url(KV_PATH, key)?;
        let response = Self::send(self.request(Method::PUT, url).body(value)).await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        debug!(key, "Consul KV put");
        Ok(key.to_string())
    }

    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, BackendError> {
        let url = self.url(KV_PATH, key)?;
        let builder = self
            .request(Method::PUT, url)
            .query(&[("cas", "0")])
            .body(value);
        let response = Self::send(builder).await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await.map_err(network_error)?;
        let created = body.trim() == "true";
        debug!(key, created, "Consul KV create");
        Ok(created)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let url = self.url(KV_PATH, key)?;
        let response = Self::send(self.request(Method::GET, url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        Self::read_pairs(response)
            .await?
            .into_iter()
            .find(|pair| pair.key == key)
            .map(|pair| pair.raw_value())
            .transpose()
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        let url = self.url(KV_PATH, key)?;
        let response = Self::send(self.request(Method::DELETE, url)).await?;
        if response.status() != StatusCode::NOT_FOUND && !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        debug!(key, "Consul KV delete");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>, BackendError> {
        let url = self.url(KV_PATH, prefix)?;
        let builder = self
            .request(Method::GET, url)
            .query(&[("recurse", "true")]);
        let response = Self::send(builder).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(BTreeMap::new());
        }
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let mut entries = BTreeMap::new();
        for pair in Self::read_pairs(response).await? {
            let value = pair.raw_value()?;
            entries.insert(pair.key, value);
        }
        debug!(prefix, count = entries.len(), "Consul KV list");
        Ok(entries)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let url = self.url(STATUS_LEADER_PATH, "")?;
        let response = Self::send(self.request(Method::GET, url)).await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let status = response.status().as_u16();
        let leader = response.text().await.map_err(network_error)?;
        let leader = leader.trim().trim_matches('"');
        if leader.is_empty() {
            return Err(BackendError::Status {
                status,
                body: "no cluster leader".to_string(),
            });
        }

        debug!(leader, "Consul leader elected");
        Ok(())
    }
}
