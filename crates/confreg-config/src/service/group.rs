//! Config group storage
//!
//! A group is a root marker key plus one key per member:
//!
//! ```text
//! config-groups/<group>/<version>                                   marker
//! config-groups/<group>/<version>/members/<digest>/<config>/<cv>    member
//! ```
//!
//! Membership changes touch exactly one member key, so concurrent changes to
//! different members of a group never overwrite each other. The membership
//! conflict check (list, then write) is not atomic: two racing adds of the
//! same config identity may both succeed, the later write winning.

use std::sync::Arc;

use confreg_common::{
    CONFIG_KIND, ConfigGroup, ConfigWithLabels, GROUP_KIND, LabelSet, RegistryError, Result,
    validate_identity,
};
use confreg_persistence::{Backend, KeyCodec};

use super::config::ConfigStore;
use super::label::LabelMatchRule;

/// A member as listed from the backend
struct StoredMember {
    key: String,
    member: ConfigWithLabels,
}

/// Group lifecycle and membership operations
#[derive(Clone)]
pub struct GroupStore {
    backend: Arc<dyn Backend>,
    keys: KeyCodec,
    configs: ConfigStore,
    removal_rule: LabelMatchRule,
}

impl GroupStore {
    pub fn new(backend: Arc<dyn Backend>, keys: KeyCodec, configs: ConfigStore) -> Self {
        Self {
            backend,
            keys,
            configs,
            removal_rule: LabelMatchRule::default(),
        }
    }

    /// Predicate used by [`GroupStore::remove_configs_with_labels_from_group`]
    pub fn with_removal_rule(mut self, rule: LabelMatchRule) -> Self {
        self.removal_rule = rule;
        self
    }

    pub fn removal_rule(&self) -> LabelMatchRule {
        self.removal_rule
    }

    /// Create a group, empty or with initial members
    pub async fn add(&self, group: &ConfigGroup) -> Result<()> {
        group.validate()?;

        let members_prefix = self.keys.members_prefix(&group.name, &group.version);
        if !self.backend.list(&members_prefix).await?.is_empty() {
            return Err(RegistryError::conflict(GROUP_KIND, &group.name, &group.version));
        }

        let marker = serde_json::to_vec(&ConfigGroup::new(&group.name, &group.version))?;
        let created = self
            .backend
            .put_if_absent(&self.keys.group_key(&group.name, &group.version), marker)
            .await?;
        if !created {
            return Err(RegistryError::conflict(GROUP_KIND, &group.name, &group.version));
        }

        for member in &group.configs {
            self.put_member(&group.name, &group.version, member).await?;
        }
        Ok(())
    }

    /// Rebuild a group from its marker and member keys
    pub async fn get(&self, name: &str, version: &str) -> Result<ConfigGroup> {
        let members = self.load_members(name, version).await?;
        Ok(ConfigGroup {
            name: name.to_string(),
            version: version.to_string(),
            configs: members.into_iter().map(|m| m.member).collect(),
        })
    }

    /// Delete a group with every member, then its marker
    pub async fn delete(&self, name: &str, version: &str) -> Result<()> {
        let members = self.load_members(name, version).await?;
        for stored in &members {
            self.backend.delete(&stored.key).await?;
        }
        self.backend.delete(&self.keys.group_key(name, version)).await?;
        Ok(())
    }

    /// Add a stored config to a group without labels
    pub async fn add_config_to_group(
        &self,
        group_name: &str,
        group_version: &str,
        config_name: &str,
        config_version: &str,
    ) -> Result<()> {
        validate_identity(GROUP_KIND, group_name, group_version)?;
        validate_identity(CONFIG_KIND, config_name, config_version)?;
        self.ensure_group(group_name, group_version).await?;

        let config = self.configs.get(config_name, config_version).await?;
        let member = ConfigWithLabels::new(config, LabelSet::new());
        self.insert_member(group_name, group_version, &member).await
    }

    pub async fn remove_config_from_group(
        &self,
        group_name: &str,
        group_version: &str,
        config_name: &str,
        config_version: &str,
    ) -> Result<()> {
        validate_identity(CONFIG_KIND, config_name, config_version)?;

        let stored = self
            .find_member(group_name, group_version, config_name, config_version)
            .await?;
        self.backend.delete(&stored.key).await?;
        Ok(())
    }

    /// Add a labelled config copy to a group
    pub async fn add_config_with_label_to_group(
        &self,
        group_name: &str,
        group_version: &str,
        member: &ConfigWithLabels,
    ) -> Result<()> {
        validate_identity(GROUP_KIND, group_name, group_version)?;
        member.config.validate()?;
        self.ensure_group(group_name, group_version).await?;

        self.insert_member(group_name, group_version, member).await
    }

    /// Replace the labels of an existing member
    pub async fn relabel_config_in_group(
        &self,
        group_name: &str,
        group_version: &str,
        config_name: &str,
        config_version: &str,
        labels: LabelSet,
    ) -> Result<()> {
        validate_identity(CONFIG_KIND, config_name, config_version)?;

        let stored = self
            .find_member(group_name, group_version, config_name, config_version)
            .await?;
        if stored.member.labels == labels {
            return Ok(());
        }

        // Old digest goes first; a failed delete leaves the member untouched
        self.backend.delete(&stored.key).await?;
        let relabelled = ConfigWithLabels::new(stored.member.config, labels);
        self.put_member(group_name, group_version, &relabelled).await?;
        Ok(())
    }

    /// Members carrying every label of `query`
    pub async fn search_configs_with_labels_in_group(
        &self,
        group_name: &str,
        group_version: &str,
        query: &LabelSet,
    ) -> Result<Vec<ConfigWithLabels>> {
        let matched: Vec<ConfigWithLabels> = self
            .load_members(group_name, group_version)
            .await?
            .into_iter()
            .map(|stored| stored.member)
            .filter(|member| LabelMatchRule::Superset.matches(&member.labels, query))
            .collect();

        if matched.is_empty() {
            return Err(RegistryError::NotFound(format!(
                "configs labelled '{}' in {} '{}/{}'",
                query, GROUP_KIND, group_name, group_version
            )));
        }
        Ok(matched)
    }

    /// Remove members matching `labels` under the store's removal rule.
    /// Returns the number of removed members.
    pub async fn remove_configs_with_labels_from_group(
        &self,
        group_name: &str,
        group_version: &str,
        labels: &LabelSet,
    ) -> Result<usize> {
        if labels.is_empty() {
            return Err(RegistryError::Validation(
                "labels cannot be empty when removing configs from a group".to_string(),
            ));
        }

        let matched: Vec<StoredMember> = self
            .load_members(group_name, group_version)
            .await?
            .into_iter()
            .filter(|stored| self.removal_rule.matches(&stored.member.labels, labels))
            .collect();
        if matched.is_empty() {
            return Err(RegistryError::NotFound(format!(
                "configs labelled '{}' in {} '{}/{}'",
                labels, GROUP_KIND, group_name, group_version
            )));
        }

        for stored in &matched {
            self.backend.delete(&stored.key).await?;
        }
        Ok(matched.len())
    }

    async fn exists(&self, name: &str, version: &str) -> Result<bool> {
        if self.backend.get(&self.keys.group_key(name, version)).await?.is_some() {
            return Ok(true);
        }
        Ok(!self
            .backend
            .list(&self.keys.members_prefix(name, version))
            .await?
            .is_empty())
    }

    async fn ensure_group(&self, name: &str, version: &str) -> Result<()> {
        if self.exists(name, version).await? {
            Ok(())
        } else {
            Err(RegistryError::not_found(GROUP_KIND, name, version))
        }
    }

    /// List and decode the members of a group; `NotFound` if the group is absent
    async fn load_members(&self, name: &str, version: &str) -> Result<Vec<StoredMember>> {
        validate_identity(GROUP_KIND, name, version)?;

        let listed = self
            .backend
            .list(&self.keys.members_prefix(name, version))
            .await?;
        if listed.is_empty()
            && self
                .backend
                .get(&self.keys.group_key(name, version))
                .await?
                .is_none()
        {
            return Err(RegistryError::not_found(GROUP_KIND, name, version));
        }

        let mut members = Vec::with_capacity(listed.len());
        for (key, value) in listed {
            let decoded = self.keys.decode_member_key(&key)?;
            let stored: ConfigWithLabels = serde_json::from_slice(&value)?;

            // Identity and labels come from the key, params from the record
            let mut config = stored.config;
            config.name = decoded.config_name;
            config.version = decoded.config_version;
            members.push(StoredMember {
                key,
                member: ConfigWithLabels::new(config, decoded.labels),
            });
        }
        Ok(members)
    }

    async fn find_member(
        &self,
        group_name: &str,
        group_version: &str,
        config_name: &str,
        config_version: &str,
    ) -> Result<StoredMember> {
        self.load_members(group_name, group_version)
            .await?
            .into_iter()
            .find(|stored| stored.member.identity() == (config_name, config_version))
            .ok_or_else(|| {
                RegistryError::NotFound(format!(
                    "{} '{}/{}' in {} '{}/{}'",
                    CONFIG_KIND, config_name, config_version, GROUP_KIND, group_name, group_version
                ))
            })
    }

    /// Write a member unless one with the same config identity exists
    async fn insert_member(
        &self,
        group_name: &str,
        group_version: &str,
        member: &ConfigWithLabels,
    ) -> Result<()> {
        let (config_name, config_version) = member.identity();
        let listed = self
            .backend
            .list(&self.keys.members_prefix(group_name, group_version))
            .await?;
        for key in listed.keys() {
            let decoded = self.keys.decode_member_key(key)?;
            if decoded.config_name == config_name && decoded.config_version == config_version {
                return Err(RegistryError::Conflict(format!(
                    "{} '{}/{}' in {} '{}/{}'",
                    CONFIG_KIND, config_name, config_version, GROUP_KIND, group_name, group_version
                )));
            }
        }

        self.put_member(group_name, group_version, member).await
    }

    async fn put_member(
        &self,
        group_name: &str,
        group_version: &str,
        member: &ConfigWithLabels,
    ) -> Result<()> {
        let key = self.keys.member_key(
            group_name,
            group_version,
            &member.labels,
            &member.config.name,
            &member.config.version,
        );
        self.backend.put(&key, serde_json::to_vec(member)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use confreg_common::{BackendError, Config};
    use confreg_persistence::MemoryBackend;

    /// Memory backend whose deletes always fail
    struct UndeletableBackend(MemoryBackend);

    #[async_trait]
    impl Backend for UndeletableBackend {
        fn name(&self) -> &'static str {
            "undeletable"
        }

        async fn put(&self, key: &str, value: Vec<u8>) -> std::result::Result<String, BackendError> {
            self.0.put(key, value).await
        }

        async fn put_if_absent(
            &self,
            key: &str,
            value: Vec<u8>,
        ) -> std::result::Result<bool, BackendError> {
            self.0.put_if_absent(key, value).await
        }

        async fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, BackendError> {
            self.0.get(key).await
        }

        async fn delete(&self, _key: &str) -> std::result::Result<(), BackendError> {
            Err(BackendError::Network("connection reset".to_string()))
        }

        async fn list(
            &self,
            prefix: &str,
        ) -> std::result::Result<BTreeMap<String, Vec<u8>>, BackendError> {
            self.0.list(prefix).await
        }

        async fn health_check(&self) -> std::result::Result<(), BackendError> {
            self.0.health_check().await
        }
    }

    fn stores() -> (ConfigStore, GroupStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let shared: Arc<dyn Backend> = Arc::new(backend.clone());
        let configs = ConfigStore::new(shared.clone(), KeyCodec::new());
        let groups = GroupStore::new(shared, KeyCodec::new(), configs.clone());
        (configs, groups, backend)
    }

    fn labels(pairs: &[(&str, &str)]) -> LabelSet {
        LabelSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[tokio::test]
    async fn test_add_empty_group() {
        let (_, groups, backend) = stores();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();

        let group = groups.get("edge", "1").await.unwrap();
        assert!(group.configs.is_empty());
        assert!(backend.get("config-groups/edge/1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_add_group_with_members() {
        let (_, groups, backend) = stores();
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("db", "1").with_param("host", "a"), labels(&[("env", "prod")]))
            .with_member(Config::new("cache", "2"), LabelSet::new());
        groups.add(&group).await.unwrap();

        assert!(
            backend
                .get("config-groups/edge/1/members/env:prod;/db/1")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            backend
                .get("config-groups/edge/1/members/-/cache/2")
                .await
                .unwrap()
                .is_some()
        );

        let loaded = groups.get("edge", "1").await.unwrap();
        assert_eq!(loaded.configs.len(), 2);
        let db = loaded.member("db", "1").unwrap();
        assert_eq!(db.config.params.get("host").map(String::as_str), Some("a"));
        assert_eq!(db.labels, labels(&[("env", "prod")]));
    }

    #[tokio::test]
    async fn test_add_group_conflict() {
        let (_, groups, _) = stores();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();
        let err = groups.add(&ConfigGroup::new("edge", "1")).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(groups.add(&ConfigGroup::new("edge", "2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_group_rejects_bad_identity() {
        let (_, groups, backend) = stores();
        assert!(groups.add(&ConfigGroup::new("", "1")).await.unwrap_err().is_validation());
        let group = ConfigGroup::new("edge", "1").with_member(Config::new("db", "a/b"), LabelSet::new());
        assert!(groups.add(&group).await.unwrap_err().is_validation());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_group() {
        let (_, groups, _) = stores();
        assert!(groups.get("edge", "1").await.unwrap_err().is_not_found());
        assert!(groups.delete("edge", "1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_group_twice() {
        let (_, groups, backend) = stores();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();

        groups.delete("edge", "1").await.unwrap();
        let err = groups.delete("edge", "1").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_add_config_with_label_to_missing_group() {
        let (_, groups, backend) = stores();
        let member = ConfigWithLabels::new(Config::new("db", "1"), labels(&[("env", "prod")]));

        let err = groups
            .add_config_with_label_to_group("edge", "1", &member)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            RegistryError::not_found(GROUP_KIND, "edge", "1").to_string()
        );
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_group_versions_do_not_share_members() {
        let (configs, groups, _) = stores();
        configs.add(&Config::new("db", "1")).await.unwrap();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();
        groups.add(&ConfigGroup::new("edge", "10")).await.unwrap();
        groups.add_config_to_group("edge", "10", "db", "1").await.unwrap();

        assert!(groups.get("edge", "1").await.unwrap().configs.is_empty());
        assert_eq!(groups.get("edge", "10").await.unwrap().configs.len(), 1);
    }

    #[tokio::test]
    async fn test_add_config_to_group() {
        let (configs, groups, _) = stores();
        configs.add(&Config::new("db", "1").with_param("host", "a")).await.unwrap();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();

        groups.add_config_to_group("edge", "1", "db", "1").await.unwrap();
        let err = groups.add_config_to_group("edge", "1", "db", "1").await.unwrap_err();
        assert!(err.is_conflict());

        let group = groups.get("edge", "1").await.unwrap();
        assert_eq!(group.configs.len(), 1);
        assert!(group.configs[0].labels.is_empty());
        assert_eq!(group.configs[0].config.params.get("host").map(String::as_str), Some("a"));
    }

    #[tokio::test]
    async fn test_add_config_to_group_requires_group_and_config() {
        let (configs, groups, _) = stores();
        configs.add(&Config::new("db", "1")).await.unwrap();

        let err = groups.add_config_to_group("edge", "1", "db", "1").await.unwrap_err();
        assert_eq!(err.to_string(), "config group 'edge/1' not found");

        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();
        let err = groups.add_config_to_group("edge", "1", "db", "2").await.unwrap_err();
        assert_eq!(err.to_string(), "config 'db/2' not found");
    }

    #[tokio::test]
    async fn test_conflict_ignores_labels() {
        let (configs, groups, _) = stores();
        configs.add(&Config::new("db", "1")).await.unwrap();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();

        let labelled = ConfigWithLabels::new(Config::new("db", "1"), labels(&[("env", "prod")]));
        groups.add_config_with_label_to_group("edge", "1", &labelled).await.unwrap();

        assert!(groups.add_config_to_group("edge", "1", "db", "1").await.unwrap_err().is_conflict());
        let relabelled = ConfigWithLabels::new(Config::new("db", "1"), labels(&[("env", "dev")]));
        assert!(
            groups
                .add_config_with_label_to_group("edge", "1", &relabelled)
                .await
                .unwrap_err()
                .is_conflict()
        );
    }

    #[tokio::test]
    async fn test_remove_config_from_group() {
        let (_, groups, backend) = stores();
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("db", "1"), labels(&[("env", "prod")]))
            .with_member(Config::new("db", "2"), LabelSet::new());
        groups.add(&group).await.unwrap();

        groups.remove_config_from_group("edge", "1", "db", "1").await.unwrap();
        assert!(
            groups
                .remove_config_from_group("edge", "1", "db", "1")
                .await
                .unwrap_err()
                .is_not_found()
        );

        let loaded = groups.get("edge", "1").await.unwrap();
        assert_eq!(loaded.configs.len(), 1);
        assert!(loaded.member("db", "2").is_some());
        // marker + one member
        assert_eq!(backend.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_group_survives_last_member_removal() {
        let (_, groups, _) = stores();
        let group = ConfigGroup::new("edge", "1").with_member(Config::new("db", "1"), LabelSet::new());
        groups.add(&group).await.unwrap();

        groups.remove_config_from_group("edge", "1", "db", "1").await.unwrap();
        assert!(groups.get("edge", "1").await.unwrap().configs.is_empty());
    }

    #[tokio::test]
    async fn test_relabel_config_in_group() {
        let (_, groups, backend) = stores();
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("db", "1").with_param("host", "a"), labels(&[("env", "dev")]));
        groups.add(&group).await.unwrap();

        groups
            .relabel_config_in_group("edge", "1", "db", "1", labels(&[("env", "prod")]))
            .await
            .unwrap();
        assert!(backend.get("config-groups/edge/1/members/env:dev;/db/1").await.unwrap().is_none());

        let loaded = groups.get("edge", "1").await.unwrap();
        assert_eq!(loaded.configs.len(), 1);
        assert_eq!(loaded.configs[0].labels, labels(&[("env", "prod")]));
        assert_eq!(loaded.configs[0].config.params.get("host").map(String::as_str), Some("a"));

        // unchanged labels are a no-op
        groups
            .relabel_config_in_group("edge", "1", "db", "1", labels(&[("env", "prod")]))
            .await
            .unwrap();
        assert_eq!(groups.get("edge", "1").await.unwrap().configs.len(), 1);

        let err = groups
            .relabel_config_in_group("edge", "1", "db", "9", LabelSet::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_relabel_with_failing_delete_keeps_single_member() {
        let backend = MemoryBackend::new();
        let shared: Arc<dyn Backend> = Arc::new(UndeletableBackend(backend.clone()));
        let configs = ConfigStore::new(shared.clone(), KeyCodec::new());
        let groups = GroupStore::new(shared, KeyCodec::new(), configs);
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("db", "1"), labels(&[("env", "dev")]));
        groups.add(&group).await.unwrap();

        let err = groups
            .relabel_config_in_group("edge", "1", "db", "1", labels(&[("env", "prod")]))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Backend(BackendError::Network(_))));

        let loaded = groups.get("edge", "1").await.unwrap();
        let members: Vec<_> = loaded
            .configs
            .iter()
            .filter(|m| m.identity() == ("db", "1"))
            .collect();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].labels, labels(&[("env", "dev")]));
        assert!(
            backend
                .get("config-groups/edge/1/members/env:prod;/db/1")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_search_configs_with_labels() {
        let (_, groups, _) = stores();
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("a", "1"), labels(&[("a", "1")]))
            .with_member(Config::new("b", "1"), labels(&[("a", "1"), ("b", "2")]))
            .with_member(Config::new("c", "1"), labels(&[("c", "3")]));
        groups.add(&group).await.unwrap();

        let mut found: Vec<String> = groups
            .search_configs_with_labels_in_group("edge", "1", &labels(&[("a", "1")]))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.config.name)
            .collect();
        found.sort();
        assert_eq!(found, vec!["a", "b"]);

        let err = groups
            .search_configs_with_labels_in_group("edge", "1", &labels(&[("d", "4")]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_configs_with_labels_superset() {
        let (_, groups, _) = stores();
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("a", "1"), labels(&[("a", "1")]))
            .with_member(Config::new("b", "1"), labels(&[("a", "1"), ("b", "2")]))
            .with_member(Config::new("c", "1"), labels(&[("c", "3")]));
        groups.add(&group).await.unwrap();

        let removed = groups
            .remove_configs_with_labels_from_group("edge", "1", &labels(&[("a", "1")]))
            .await
            .unwrap();
        assert_eq!(removed, 2);

        let loaded = groups.get("edge", "1").await.unwrap();
        assert_eq!(loaded.configs.len(), 1);
        assert!(loaded.member("c", "1").is_some());

        let err = groups
            .remove_configs_with_labels_from_group("edge", "1", &labels(&[("a", "1")]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_configs_with_labels_exact() {
        let (_, groups, _) = stores();
        let groups = groups.with_removal_rule(LabelMatchRule::Exact);
        assert_eq!(groups.removal_rule(), LabelMatchRule::Exact);

        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("a", "1"), labels(&[("a", "1")]))
            .with_member(Config::new("b", "1"), labels(&[("a", "1"), ("b", "2")]));
        groups.add(&group).await.unwrap();

        let removed = groups
            .remove_configs_with_labels_from_group("edge", "1", &labels(&[("a", "1")]))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(groups.get("edge", "1").await.unwrap().member("b", "1").is_some());
    }

    #[tokio::test]
    async fn test_remove_with_empty_labels_is_rejected() {
        let (_, groups, _) = stores();
        groups
            .add(&ConfigGroup::new("edge", "1").with_member(Config::new("a", "1"), LabelSet::new()))
            .await
            .unwrap();

        let err = groups
            .remove_configs_with_labels_from_group("edge", "1", &LabelSet::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(groups.get("edge", "1").await.unwrap().configs.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_group_removes_every_key() {
        let (configs, groups, backend) = stores();
        configs.add(&Config::new("db", "1")).await.unwrap();
        let group = ConfigGroup::new("edge", "1")
            .with_member(Config::new("a", "1"), labels(&[("a", "1")]))
            .with_member(Config::new("b", "1"), LabelSet::new());
        groups.add(&group).await.unwrap();

        groups.delete("edge", "1").await.unwrap();
        assert!(groups.get("edge", "1").await.unwrap_err().is_not_found());
        assert!(backend.list("config-groups/").await.unwrap().is_empty());
        // configs are untouched
        assert!(configs.get("db", "1").await.is_ok());
    }

    #[tokio::test]
    async fn test_config_delete_does_not_cascade() {
        let (configs, groups, _) = stores();
        configs.add(&Config::new("db", "1")).await.unwrap();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();
        groups.add_config_to_group("edge", "1", "db", "1").await.unwrap();

        configs.delete("db", "1").await.unwrap();
        assert!(groups.get("edge", "1").await.unwrap().member("db", "1").is_some());
    }

    #[tokio::test]
    async fn test_malformed_member_key() {
        let (_, groups, backend) = stores();
        groups.add(&ConfigGroup::new("edge", "1")).await.unwrap();
        backend
            .put("config-groups/edge/1/members/broken", b"{}".to_vec())
            .await
            .unwrap();

        let err = groups.get("edge", "1").await.unwrap_err();
        assert!(matches!(err, RegistryError::MalformedKey { .. }));
    }
}
