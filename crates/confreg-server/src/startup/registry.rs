//! Process-owned registry state
//!
//! One backend shared by the config and group stores. Built once at startup
//! and handed to whatever serves requests.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use confreg_common::BackendError;
use confreg_config::{ConfigStore, GroupStore, LabelMatchRule};
use confreg_persistence::{Backend, ConsulBackend, KeyCodec, MemoryBackend, StorageMode};

use crate::model::Configuration;

#[derive(Clone)]
pub struct Registry {
    backend: Arc<dyn Backend>,
    configs: ConfigStore,
    groups: GroupStore,
}

impl Registry {
    pub fn new(backend: Arc<dyn Backend>, keys: KeyCodec, removal_rule: LabelMatchRule) -> Self {
        let configs = ConfigStore::new(backend.clone(), keys.clone());
        let groups = GroupStore::new(backend.clone(), keys, configs.clone())
            .with_removal_rule(removal_rule);
        Self {
            backend,
            configs,
            groups,
        }
    }

    /// Build the backend and stores selected by configuration
    pub fn from_configuration(configuration: &Configuration) -> anyhow::Result<Self> {
        let mode = configuration.storage_mode()?;
        let backend: Arc<dyn Backend> = match mode {
            StorageMode::Memory => Arc::new(MemoryBackend::new()),
            StorageMode::Consul => {
                let consul = configuration.consul_config();
                info!(address = %consul.address, datacenter = ?consul.datacenter, "Using Consul KV storage");
                Arc::new(
                    ConsulBackend::new(consul).context("Failed to create Consul KV backend")?,
                )
            }
        };

        let keys = KeyCodec::with_root(&configuration.key_prefix());
        let removal_rule = configuration.label_removal_rule()?;
        info!(
            storage_mode = %mode,
            key_prefix = keys.root(),
            label_removal_rule = %removal_rule,
            "Registry initialized"
        );

        Ok(Self::new(backend, keys, removal_rule))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn configs(&self) -> &ConfigStore {
        &self.configs
    }

    pub fn groups(&self) -> &GroupStore {
        &self.groups
    }

    pub async fn health_check(&self) -> Result<(), BackendError> {
        self.backend.health_check().await
    }
}
