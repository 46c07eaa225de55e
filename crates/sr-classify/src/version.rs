//! Feature version tokens for version-gated rules.
//!
//! The target engine reports a dotted-numeric version (e.g. `4.2.5`).
//! Ordering is componentwise; a shorter token compares as if padded with
//! zeros, so `4.2` == `4.2.0` and `4.2.5` < `4.4.2`.

use crate::error::{ClassifyError, ClassifyResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// A parsed dotted-numeric version.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureVersion {
    #[serde(serialize_with = "serialize_components")]
    components: Vec<u32>,
}

/// Equality follows the padded componentwise ordering, so `4.2` == `4.2.0`.
impl PartialEq for FeatureVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

fn serialize_components<S: serde::Serializer>(
    components: &[u32],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let rendered: Vec<String> = components.iter().map(u32::to_string).collect();
    serializer.serialize_str(&rendered.join("."))
}

impl FeatureVersion {
    pub fn components(&self) -> &[u32] {
        &self.components
    }
}

impl FromStr for FeatureVersion {
    type Err = ClassifyError;

    fn from_str(token: &str) -> ClassifyResult<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ClassifyError::VersionParse {
                token: token.to_string(),
            });
        }
        let components = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u32>().map_err(|_| ClassifyError::VersionParse {
                    token: token.to_string(),
                })
            })
            .collect::<ClassifyResult<Vec<u32>>>()?;
        Ok(Self { components })
    }
}

impl<'de> Deserialize<'de> for FeatureVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Ord for FeatureVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for FeatureVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for FeatureVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(u32::to_string).collect();
        f.write_str(&rendered.join("."))
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
