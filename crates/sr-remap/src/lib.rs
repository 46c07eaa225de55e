//! sr-remap - Remap resolver for Schemarec
//!
//! Assigns every source object a target `(owner, name)` identity using
//! explicit rules, per-type inference policies, and synonym-chain
//! resolution, then re-expresses the dependency graph in remapped
//! coordinates.

pub mod depgraph;
pub mod error;
pub mod resolver;
pub mod rules;

pub use depgraph::build_dependency_graph;
pub use error::{RemapError, RemapResult};
pub use resolver::{resolve_synonym_base, RemapEdge, RemapMap, RemapResolver, RuleOrigin};
pub use rules::{ExplicitRule, InferencePolicy, RemapRuleSet};
