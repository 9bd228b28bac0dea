// Label predicates for group members

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use confreg_common::{LabelSet, RegistryError};

/// Every query label is present on the member with an equal value.
/// Extra member labels are ignored; an empty query matches everything.
pub fn matches_superset(member: &LabelSet, query: &LabelSet) -> bool {
    query.iter().all(|(k, v)| member.get(k) == Some(v))
}

/// Member and query hold exactly the same pairs
pub fn matches_exact(member: &LabelSet, query: &LabelSet) -> bool {
    member == query
}

/// Which predicate a call site applies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMatchRule {
    #[default]
    Superset,
    Exact,
}

impl LabelMatchRule {
    pub fn matches(self, member: &LabelSet, query: &LabelSet) -> bool {
        match self {
            LabelMatchRule::Superset => matches_superset(member, query),
            LabelMatchRule::Exact => matches_exact(member, query),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelMatchRule::Superset => "superset",
            LabelMatchRule::Exact => "exact",
        }
    }
}

impl FromStr for LabelMatchRule {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "superset" => Ok(LabelMatchRule::Superset),
            "exact" => Ok(LabelMatchRule::Exact),
            other => Err(RegistryError::Validation(format!(
                "unknown label match rule '{}', expected 'superset' or 'exact'",
                other
            ))),
        }
    }
}

impl Display for LabelMatchRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
