//! Entity model of the registry
//!
//! A [`Config`] is a named, versioned parameter set. A [`ConfigGroup`] holds
//! copies of configs, each tagged with a [`LabelSet`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::utils::{is_valid_label_part, is_valid_segment};
use crate::{CONFIG_KIND, GROUP_KIND};

/// Validate a (name, version) identity of the given entity kind
pub fn validate_identity(kind: &str, name: &str, version: &str) -> Result<()> {
    for (field, value) in [("name", name), ("version", version)] {
        if value.trim().is_empty() {
            return Err(RegistryError::Validation(format!(
                "{} {} cannot be empty",
                kind, field
            )));
        }
        if !is_valid_segment(value) {
            return Err(RegistryError::Validation(format!(
                "{} {} '{}' must not contain '/' or be '.' or '..'",
                kind, field, value
            )));
        }
    }
    Ok(())
}

/// A named, versioned parameter set
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Config {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_identity(CONFIG_KIND, &self.name, &self.version)
    }
}

/// A single key/value tag
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

impl Label {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// The labels of one group membership
///
/// Keys are unique and kept in ascending order. Construction rejects a key
/// given twice with different values; an exact repeat collapses into one
/// label. Serialized as a list of `{key, value}` objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Label>", into = "Vec<Label>")]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<I>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Label>,
    {
        let mut set = BTreeMap::new();
        for label in labels {
            for part in [&label.key, &label.value] {
                if !is_valid_label_part(part) {
                    return Err(RegistryError::Validation(format!(
                        "invalid label '{}', expected non-empty key:value without '/', ':' or ';'",
                        label
                    )));
                }
            }
            match set.get(&label.key) {
                Some(existing) if *existing != label.value => {
                    return Err(RegistryError::Validation(format!(
                        "label key '{}' given twice with values '{}' and '{}'",
                        label.key, existing, label.value
                    )));
                }
                Some(_) => {}
                None => {
                    set.insert(label.key, label.value);
                }
            }
        }
        Ok(Self(set))
    }

    /// Convenience constructor from `(key, value)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::from_labels(pairs.into_iter().map(|(k, v)| Label::new(k, v)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_labels(&self) -> Vec<Label> {
        self.iter().map(|(k, v)| Label::new(k, v)).collect()
    }
}

impl TryFrom<Vec<Label>> for LabelSet {
    type Error = RegistryError;

    fn try_from(value: Vec<Label>) -> Result<Self> {
        Self::from_labels(value)
    }
}

impl From<LabelSet> for Vec<Label> {
    fn from(value: LabelSet) -> Self {
        value
            .0
            .into_iter()
            .map(|(key, value)| Label { key, value })
            .collect()
    }
}

impl Display for LabelSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
        write!(f, "{}", joined.join(","))
    }
}

/// A config's membership in a group
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigWithLabels {
    #[serde(flatten)]
    pub config: Config,
    #[serde(default)]
    pub labels: LabelSet,
}

impl ConfigWithLabels {
    pub fn new(config: Config, labels: LabelSet) -> Self {
        Self { config, labels }
    }

    pub fn identity(&self) -> (&str, &str) {
        (&self.config.name, &self.config.version)
    }
}

/// A named, versioned collection of config memberships
///
/// Member order carries no meaning; a group read back from storage lists its
/// members in backend order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigGroup {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub configs: Vec<ConfigWithLabels>,
}

impl ConfigGroup {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            configs: Vec::new(),
        }
    }

    pub fn with_member(mut self, config: Config, labels: LabelSet) -> Self {
        self.configs.push(ConfigWithLabels::new(config, labels));
        self
    }

    /// Find the member holding the given config identity
    pub fn member(&self, config_name: &str, config_version: &str) -> Option<&ConfigWithLabels> {
        self.configs
            .iter()
            .find(|m| m.identity() == (config_name, config_version))
    }

    /// Validate the group identity, every member identity, and member uniqueness
    pub fn validate(&self) -> Result<()> {
        validate_identity(GROUP_KIND, &self.name, &self.version)?;

        let mut seen = HashSet::new();
        for member in &self.configs {
            member.config.validate()?;
            if !seen.insert(member.identity()) {
                return Err(RegistryError::Conflict(format!(
                    "{} '{}/{}' in {} '{}/{}'",
                    CONFIG_KIND,
                    member.config.name,
                    member.config.version,
                    GROUP_KIND,
                    self.name,
                    self.version
                )));
            }
        }
        Ok(())
    }
}
