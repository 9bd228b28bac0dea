//! Config storage
//!
//! Each config version is one JSON record at `configs/<name>/<version>`.
//! Records are immutable: a new version is a new record.

use std::sync::Arc;

use confreg_common::{CONFIG_KIND, Config, RegistryError, Result, validate_identity};
use confreg_persistence::{Backend, KeyCodec};

/// Add, fetch and delete configs
#[derive(Clone)]
pub struct ConfigStore {
    backend: Arc<dyn Backend>,
    keys: KeyCodec,
}

impl ConfigStore {
    pub fn new(backend: Arc<dyn Backend>, keys: KeyCodec) -> Self {
        Self { backend, keys }
    }

    /// Persist a new config; fails if the (name, version) already exists
    pub async fn add(&self, config: &Config) -> Result<()> {
        config.validate()?;

        let key = self.keys.config_key(&config.name, &config.version);
        let value = serde_json::to_vec(config)?;
        if !self.backend.put_if_absent(&key, value).await? {
            return Err(RegistryError::conflict(
                CONFIG_KIND,
                &config.name,
                &config.version,
            ));
        }
        Ok(())
    }

    pub async fn get(&self, name: &str, version: &str) -> Result<Config> {
        validate_identity(CONFIG_KIND, name, version)?;

        let key = self.keys.config_key(name, version);
        match self.backend.get(&key).await? {
            Some(value) => Ok(serde_json::from_slice(&value)?),
            None => Err(RegistryError::not_found(CONFIG_KIND, name, version)),
        }
    }

    /// Delete a config. Group members holding a copy of it are left alone.
    pub async fn delete(&self, name: &str, version: &str) -> Result<()> {
        validate_identity(CONFIG_KIND, name, version)?;

        let key = self.keys.config_key(name, version);
        if self.backend.get(&key).await?.is_none() {
            return Err(RegistryError::not_found(CONFIG_KIND, name, version));
        }
        self.backend.delete(&key).await?;
        Ok(())
    }

    pub async fn exists(&self, name: &str, version: &str) -> Result<bool> {
        validate_identity(CONFIG_KIND, name, version)?;
        Ok(self
            .backend
            .get(&self.keys.config_key(name, version))
            .await?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confreg_persistence::MemoryBackend;

    fn store() -> (ConfigStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let store = ConfigStore::new(Arc::new(backend.clone()), KeyCodec::new());
        (store, backend)
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let (store, backend) = store();
        let config = Config::new("db", "1.0").with_param("host", "localhost");

        store.add(&config).await.unwrap();
        assert_eq!(store.get("db", "1.0").await.unwrap(), config);
        assert!(backend.get("configs/db/1.0").await.unwrap().is_some());
        assert!(store.exists("db", "1.0").await.unwrap());
        assert!(!store.exists("db", "2.0").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_conflict_keeps_first_value() {
        let (store, _) = store();
        let first = Config::new("db", "1").with_param("host", "a");
        let second = Config::new("db", "1").with_param("host", "b");

        store.add(&first).await.unwrap();
        let err = store.add(&second).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.get("db", "1").await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_add_validates_identity() {
        let (store, backend) = store();
        assert!(store.add(&Config::new("", "1")).await.unwrap_err().is_validation());
        assert!(store.add(&Config::new("a/b", "1")).await.unwrap_err().is_validation());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let (store, _) = store();
        let err = store.get("db", "1").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "config 'db/1' not found");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (store, _) = store();
        store.add(&Config::new("db", "1")).await.unwrap();

        store.delete("db", "1").await.unwrap();
        assert!(store.delete("db", "1").await.unwrap_err().is_not_found());
        assert!(store.get("db", "1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_versions_are_independent() {
        let (store, _) = store();
        store.add(&Config::new("db", "1")).await.unwrap();
        store.add(&Config::new("db", "2")).await.unwrap();

        store.delete("db", "1").await.unwrap();
        assert!(store.get("db", "2").await.is_ok());
    }
}
