//! Classification rule set.
//!
//! Rules are data, loadable from a hot-swappable YAML source. A rule that
//! fails to deserialize is skipped with a warning — one bad entry never
//! takes down the run. Disabled rules and rules outside the target's
//! version gate are skipped and logged, never silently misapplied.

use crate::error::{ClassifyError, ClassifyResult};
use crate::version::FeatureVersion;
use serde::{Deserialize, Serialize};
use sr_core::object::{ObjectType, SchemaObject};
use sr_core::pattern::NamePattern;
use sr_core::reason::ReasonCode;
use sr_core::summary::RunSummary;
use std::path::Path;

/// What a matching rule says about the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The object cannot be migrated automatically; dependents are blocked
    Unsupported,
    /// Tracked for conversion reporting, but dependents are not blocked
    Advisory,
    /// Excluded from comparison entirely
    Skip,
}

/// One classification rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the blacklist source this rule came from
    #[serde(default)]
    pub source: Option<String>,

    /// Owner pattern; absent matches every owner
    #[serde(default)]
    pub owner: Option<NamePattern>,
    /// Object-name pattern; absent matches every name
    #[serde(default)]
    pub name: Option<NamePattern>,
    /// Restrict to one object type
    #[serde(default)]
    pub object_type: Option<ObjectType>,
    /// Match objects with any column of this declared type
    #[serde(default)]
    pub column_type: Option<NamePattern>,
    /// Attribute key that must be present for the rule to evaluate;
    /// its absence is an evaluation failure (isolated per rule)
    #[serde(default)]
    pub requires_attribute: Option<String>,

    pub verdict: Verdict,
    pub reason_code: ReasonCode,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub min_version: Option<FeatureVersion>,
    #[serde(default)]
    pub max_version: Option<FeatureVersion>,
}

fn default_enabled() -> bool {
    true
}

/// Why a rule did not match an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEvalError {
    /// `requires_attribute` key absent on the object
    MissingAttribute { key: String },
}

impl ClassificationRule {
    /// Whether this rule is live for the given target version.
    pub fn in_version_gate(&self, target: &FeatureVersion) -> bool {
        if let Some(min) = &self.min_version {
            if target < min {
                return false;
            }
        }
        if let Some(max) = &self.max_version {
            if target > max {
                return false;
            }
        }
        true
    }

    /// Evaluate the rule against one object.
    ///
    /// An `Err` means the rule could not be evaluated at all (not that it
    /// failed to match); callers isolate it and continue with other rules.
    pub fn evaluate(&self, object: &SchemaObject) -> Result<bool, RuleEvalError> {
        if let Some(key) = &self.requires_attribute {
            if !object.attributes.contains_key(key) {
                return Err(RuleEvalError::MissingAttribute { key: key.clone() });
            }
        }
        if let Some(required) = &self.object_type {
            if *required != object.object_type {
                return Ok(false);
            }
        }
        if let Some(pattern) = &self.owner {
            if !pattern.matches(&object.owner) {
                return Ok(false);
            }
        }
        if let Some(pattern) = &self.name {
            if !pattern.matches(&object.name) {
                return Ok(false);
            }
        }
        if let Some(pattern) = &self.column_type {
            if !object.columns.iter().any(|c| pattern.matches(&c.data_type)) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// An ordered collection of classification rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<ClassificationRule>,
}

impl RuleSet {
    /// Load rules from a YAML file.
    pub fn from_file(path: &Path) -> ClassifyResult<Self> {
        if !path.exists() {
            return Err(ClassifyError::RuleFileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ClassifyError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_str_tolerant(&content).map_err(|e| ClassifyError::RuleFileParse {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }

    /// Parse a YAML rule document, skipping malformed entries with a
    /// warning instead of failing the load.
    pub fn from_str_tolerant(content: &str) -> Result<Self, serde_yaml::Error> {
        let raw: Vec<serde_yaml::Value> = serde_yaml::from_str(content)?;
        let mut rules = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_yaml::from_value::<ClassificationRule>(value) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    log::warn!("ignoring malformed classification rule at index {index}: {e}");
                }
            }
        }
        Ok(Self { rules })
    }

    /// The rules live for this run: enabled and inside the version gate.
    /// Skipped rules are logged and recorded in the summary.
    pub fn active<'a>(
        &'a self,
        target_version: &FeatureVersion,
        summary: &mut RunSummary,
    ) -> Vec<&'a ClassificationRule> {
        let mut live = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !rule.enabled {
                log::info!("rule {} disabled; skipping", rule.id);
                summary.record_fallback(
                    None,
                    ReasonCode::RuleSkipped,
                    format!("rule {} disabled", rule.id),
                );
                continue;
            }
            if !rule.in_version_gate(target_version) {
                log::info!(
                    "rule {} outside version gate for target {target_version}; skipping",
                    rule.id
                );
                summary.record_fallback(
                    None,
                    ReasonCode::RuleSkipped,
                    format!("rule {} outside version gate for {target_version}", rule.id),
                );
                continue;
            }
            live.push(rule);
        }
        live
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
