//! Dataset config records and privacy-group identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// ThreatExchange privacy-group id in canonical string form.
///
/// Callers send ids either as JSON strings or integers; both decode to the
/// same value so store lookups never depend on the caller's encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrivacyGroupId(String);

impl PrivacyGroupId {
    pub fn new(id: impl Into<String>) -> Result<Self, crate::Error> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(crate::Error::MalformedRequest(
                "privacy_group_id must not be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrivacyGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PrivacyGroupId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PrivacyGroupId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PrivacyGroupId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        let raw = match RawId::deserialize(deserializer) {
            Ok(RawId::Text(s)) => s,
            Ok(RawId::Number(n)) => n.to_string(),
            Err(_) => {
                return Err(serde::de::Error::custom(
                    "privacy_group_id must be a string or a non-negative integer",
                ))
            }
        };
        PrivacyGroupId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Stored configuration for one ThreatExchange privacy group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub privacy_group_id: PrivacyGroupId,
    pub privacy_group_name: String,
    #[serde(default)]
    pub description: String,
    pub fetcher_active: bool,
    pub matcher_active: bool,
    pub write_back: bool,
    pub in_use: bool,
}
