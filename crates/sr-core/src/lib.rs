//! sr-core - Core library for Schemarec
//!
//! This crate provides the normalized object model, attribute diffing with
//! type-system normalization, the SQL text tokenizer used for safe masked
//! rewriting, the dependency graph, and the shared configuration and
//! reason-code types used across all Schemarec components.

pub mod config;
pub mod diff;
pub mod error;
pub mod graph;
pub mod ident;
pub mod model;
pub mod normalize;
pub mod object;
pub mod pattern;
pub mod reason;
pub mod sqltext;
pub mod summary;

pub use config::{AbortPolicy, EngineConfig, IdempotencyMode};
pub use diff::{diff_objects, AttributeDiff, DiffKind};
pub use error::{CoreError, CoreResult};
pub use graph::{is_builtin_ref, DependencyGraph};
pub use ident::{ObjectName, OwnerName};
pub use model::ObjectModel;
pub use object::{
    ColumnMeta, ConstraintKind, ConstraintMeta, GrantMeta, IndexMeta, ObjectRef, ObjectStatus,
    ObjectType, RawDependency, ReferenceKind, SchemaObject, Side,
};
pub use pattern::NamePattern;
pub use reason::{ReasonCode, SuppressionTag};
pub use summary::{EventSeverity, RunEvent, RunSummary};
