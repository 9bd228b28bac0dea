//! Backend trait for the flat key-value storage abstraction
//!
//! Both the in-process map and the Consul adapter implement this trait, so
//! the config and group stores carry no per-backend logic.

use std::collections::BTreeMap;

use async_trait::async_trait;

use confreg_common::BackendError;

/// Key-value storage capability
///
/// Single-key operations are atomic and linearizable per key. `list` is a
/// point-in-time snapshot; it may race with concurrent writes under the same
/// prefix.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Store `value` under `key`, replacing any previous value. Returns the key.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<String, BackendError>;

    /// Store `value` only if `key` is absent. Returns `false` if it already existed.
    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, BackendError>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), BackendError>;

    /// All entries whose key starts with `prefix` (plain string prefix match)
    async fn list(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>, BackendError>;

    /// Health check for the storage backend
    async fn health_check(&self) -> Result<(), BackendError>;
}
