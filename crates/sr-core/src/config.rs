//! Engine configuration.
//!
//! One immutable struct, deserialized once and passed by reference into
//! the resolver, classifier, and synthesizer constructors. There is no
//! process-wide mutable settings state.

use crate::error::{CoreError, CoreResult};
use crate::object::ObjectType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on the metadata loader pool, regardless of core count.
pub const MAX_LOAD_WORKERS: usize = 8;

/// How synthesized DDL is made safe to re-execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdempotencyMode {
    /// Emit the statement as-is
    None,
    /// `CREATE OR REPLACE` (replaceable object types only)
    Replace,
    /// Existence-guard wrapper that skips creation when present
    Guard,
    /// Guarded drop, then create
    DropCreate,
}

/// What to do when a metadata load partition fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortPolicy {
    /// Continue with the partitions that succeeded
    BestEffort,
    /// Any partition failure aborts the run
    AllOrNothing,
}

/// Immutable engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schemas under migration management
    #[serde(default)]
    pub schemas: Vec<String>,

    /// Idempotency style for non-replaceable object types
    #[serde(default = "default_guard_mode")]
    pub guard_mode: IdempotencyMode,

    /// Object types compared for existence only (no attribute drift)
    #[serde(default)]
    pub existence_only_types: Vec<ObjectType>,

    /// Partition failure policy for metadata loading
    #[serde(default = "default_abort_policy")]
    pub abort_policy: AbortPolicy,

    /// Loader pool size; defaults to min(cores, MAX_LOAD_WORKERS)
    #[serde(default)]
    pub load_workers: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            guard_mode: default_guard_mode(),
            existence_only_types: Vec::new(),
            abort_policy: default_abort_policy(),
            load_workers: None,
        }
    }
}

fn default_guard_mode() -> IdempotencyMode {
    IdempotencyMode::Guard
}

fn default_abort_policy() -> AbortPolicy {
    AbortPolicy::BestEffort
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate invariants that serde cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        if self.guard_mode == IdempotencyMode::Replace {
            return Err(CoreError::ConfigInvalid {
                message: "guard_mode applies to non-replaceable types; use guard or drop_create"
                    .to_string(),
            });
        }
        if self.load_workers == Some(0) {
            return Err(CoreError::ConfigInvalid {
                message: "load_workers must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Effective loader pool size.
    pub fn effective_load_workers(&self) -> usize {
        self.load_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(usize::from)
                .unwrap_or(1)
                .min(MAX_LOAD_WORKERS)
        })
    }

    /// Whether an object type is compared for existence only.
    pub fn is_existence_only(&self, object_type: &ObjectType) -> bool {
        self.existence_only_types.contains(object_type)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
