// In-process key-value backend
// Flat key -> raw value map with Consul-style string prefix listing

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use confreg_common::BackendError;

use crate::traits::Backend;

/// In-memory backend
///
/// Cloning shares the underlying map, so one instance can back several stores.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    /// Key-value storage: key -> raw value
    store: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<String, BackendError> {
        self.store.insert(key.to_string(), value);
        Ok(key.to_string())
    }

    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, BackendError> {
        match self.store.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                Ok(true)
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        self.store.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>, BackendError> {
        Ok(self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
