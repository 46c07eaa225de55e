//! sr-classify - Compatibility classifier for Schemarec
//!
//! Applies the version-gated rule set and target-side existence check to
//! every source object, then propagates BLOCKED outward from unsupported
//! objects across the dependency graph with per-object root-cause chains.

pub mod classifier;
pub mod error;
pub mod result;
pub mod rules;
pub mod version;

pub use classifier::{ClassificationReport, Classifier};
pub use error::{ClassifyError, ClassifyResult};
pub use result::{ClassificationResult, RootCauseEntry, Status};
pub use rules::{ClassificationRule, RuleEvalError, RuleSet, Verdict};
pub use version::FeatureVersion;
