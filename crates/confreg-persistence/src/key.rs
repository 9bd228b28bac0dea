//! Key layout
//!
//! Entities live in one flat key space, each kind under its own namespace:
//!
//! ```text
//! <root>configs/<name>/<version>
//! <root>config-groups/<name>/<version>                         group root marker
//! <root>config-groups/<name>/<version>/members/<digest>/<config>/<configVersion>
//! ```
//!
//! `<digest>` is the member's label set sorted by key, written as `key:value;`
//! pairs, or `-` for an empty label set.

use std::collections::HashSet;

use confreg_common::{Label, LabelSet, RegistryError, Result};

pub const CONFIG_NAMESPACE: &str = "configs";
pub const GROUP_NAMESPACE: &str = "config-groups";
pub const MEMBERS_SEGMENT: &str = "members";
pub const EMPTY_LABELS_SEGMENT: &str = "-";

const MEMBER_KEY_SEGMENTS: usize = 6;

/// Canonical, order-independent serialization of a label set
pub fn label_digest(labels: &LabelSet) -> String {
    if labels.is_empty() {
        return EMPTY_LABELS_SEGMENT.to_string();
    }
    labels.iter().map(|(k, v)| format!("{}:{};", k, v)).collect()
}

/// Parse a digest segment back into a label set
///
/// Returns the failure reason on bad syntax; the caller attaches the key.
pub fn parse_label_digest(digest: &str) -> std::result::Result<LabelSet, String> {
    if digest == EMPTY_LABELS_SEGMENT {
        return Ok(LabelSet::new());
    }
    let body = digest
        .strip_suffix(';')
        .ok_or_else(|| format!("label digest '{}' must end with ';'", digest))?;

    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for pair in body.split(';') {
        let (key, value) = pair
            .split_once(':')
            .ok_or_else(|| format!("label pair '{}' is not key:value", pair))?;
        if key.is_empty() || value.is_empty() {
            return Err(format!("label pair '{}' has an empty key or value", pair));
        }
        if !seen.insert(key) {
            return Err(format!("label key '{}' appears twice", key));
        }
        labels.push(Label::new(key, value));
    }

    LabelSet::from_labels(labels).map_err(|e| e.to_string())
}

/// A decoded group member key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberKey {
    pub group_name: String,
    pub group_version: String,
    pub labels: LabelSet,
    pub config_name: String,
    pub config_version: String,
}

/// Encodes entity identities into backend keys and decodes member keys
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyCodec {
    root: String,
}

impl KeyCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place every key under `root`; surrounding slashes are ignored
    pub fn with_root(root: &str) -> Self {
        let trimmed = root.trim().trim_matches('/');
        let root = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}/", trimmed)
        };
        Self { root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn config_key(&self, name: &str, version: &str) -> String {
        format!("{}{}/{}/{}", self.root, CONFIG_NAMESPACE, name, version)
    }

    /// Root marker key recording that a group exists
    pub fn group_key(&self, name: &str, version: &str) -> String {
        format!("{}{}/{}/{}", self.root, GROUP_NAMESPACE, name, version)
    }

    /// Prefix under which all members of one group are listed
    pub fn members_prefix(&self, name: &str, version: &str) -> String {
        format!("{}/{}/", self.group_key(name, version), MEMBERS_SEGMENT)
    }

    pub fn member_key(
        &self,
        group_name: &str,
        group_version: &str,
        labels: &LabelSet,
        config_name: &str,
        config_version: &str,
    ) -> String {
        format!(
            "{}{}/{}/{}",
            self.members_prefix(group_name, group_version),
            label_digest(labels),
            config_name,
            config_version
        )
    }

    pub fn decode_member_key(&self, key: &str) -> Result<MemberKey> {
        let namespace = format!("{}{}/", self.root, GROUP_NAMESPACE);
        let rest = key.strip_prefix(&namespace).ok_or_else(|| {
            RegistryError::malformed_key(key, format!("expected prefix '{}'", namespace))
        })?;

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.len() != MEMBER_KEY_SEGMENTS {
            return Err(RegistryError::malformed_key(
                key,
                format!(
                    "expected {} segments after '{}', found {}",
                    MEMBER_KEY_SEGMENTS,
                    namespace,
                    segments.len()
                ),
            ));
        }
        if segments[2] != MEMBERS_SEGMENT {
            return Err(RegistryError::malformed_key(
                key,
                format!("missing '{}' marker", MEMBERS_SEGMENT),
            ));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(RegistryError::malformed_key(key, "empty path segment"));
        }

        let labels =
            parse_label_digest(segments[3]).map_err(|reason| RegistryError::malformed_key(key, reason))?;

        Ok(MemberKey {
            group_name: segments[0].to_string(),
            group_version: segments[1].to_string(),
            labels,
            config_name: segments[4].to_string(),
            config_version: segments[5].to_string(),
        })
    }
}
