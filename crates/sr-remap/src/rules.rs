//! Remap rule set: explicit mapping rules and inference policies.

use crate::error::{RemapError, RemapResult};
use serde::{Deserialize, Serialize};
use sr_core::object::ObjectType;
use sr_core::pattern::NamePattern;
use std::collections::BTreeMap;
use std::path::Path;

/// Inference policy for dependent/bound object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferencePolicy {
    /// Follow the owning/referenced object's resolved schema
    Infer,
    /// Never move: keep the source schema
    SourceOnly,
    /// Follow the majority mapping of the object's reference set
    Dominant,
}

/// One explicit mapping rule. Exact when the patterns carry no wildcard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplicitRule {
    pub source_owner: NamePattern,
    /// Object-name pattern; absent means "every object of the owner"
    #[serde(default)]
    pub source_name: Option<NamePattern>,
    /// Restrict the rule to one object type
    #[serde(default)]
    pub object_type: Option<ObjectType>,
    pub target_owner: String,
    /// Rename the object; absent keeps the source name
    #[serde(default)]
    pub target_name: Option<String>,
}

impl ExplicitRule {
    /// Whether this rule applies to the given source identity.
    pub fn applies_to(&self, owner: &str, name: &str, object_type: &ObjectType) -> bool {
        if let Some(required) = &self.object_type {
            if required != object_type {
                return false;
            }
        }
        if !self.source_owner.matches(owner) {
            return false;
        }
        match &self.source_name {
            Some(pattern) => pattern.matches(name),
            None => true,
        }
    }
}

/// The full remap rule set, loadable from YAML.
///
/// Explicit rules are evaluated in file order; the first match wins, which
/// keeps resolution deterministic under overlapping patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemapRuleSet {
    #[serde(default)]
    pub explicit: Vec<ExplicitRule>,

    /// Per-object-type inference policy for bound/dependent kinds
    #[serde(default)]
    pub policies: BTreeMap<ObjectType, InferencePolicy>,
}

impl RemapRuleSet {
    /// Load rules from a YAML file.
    pub fn from_file(path: &Path) -> RemapResult<Self> {
        if !path.exists() {
            return Err(RemapError::RuleFileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| RemapError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let rules: Self = serde_yaml::from_str(&content).map_err(|e| RemapError::RuleParse {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        rules.validate().map_err(|details| RemapError::RuleParse {
            path: path.display().to_string(),
            details,
        })?;
        Ok(rules)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        for (index, rule) in self.explicit.iter().enumerate() {
            if rule.target_owner.is_empty() {
                return Err(format!("explicit rule {index} has an empty target_owner"));
            }
            if matches!(&rule.target_name, Some(name) if name.is_empty()) {
                return Err(format!("explicit rule {index} has an empty target_name"));
            }
        }
        Ok(())
    }

    /// First explicit rule matching the identity, if any.
    pub fn explicit_match(
        &self,
        owner: &str,
        name: &str,
        object_type: &ObjectType,
    ) -> Option<&ExplicitRule> {
        self.explicit
            .iter()
            .find(|r| r.applies_to(owner, name, object_type))
    }

    /// Inference policy for an object type; bound kinds default to `Infer`,
    /// everything else to `SourceOnly`.
    pub fn policy_for(&self, object_type: &ObjectType) -> InferencePolicy {
        if let Some(&policy) = self.policies.get(object_type) {
            return policy;
        }
        match object_type {
            ObjectType::Trigger
            | ObjectType::Sequence
            | ObjectType::Synonym
            | ObjectType::Index
            | ObjectType::Constraint
            | ObjectType::PackageBody
            | ObjectType::TypeBody => InferencePolicy::Infer,
            _ => InferencePolicy::SourceOnly,
        }
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
