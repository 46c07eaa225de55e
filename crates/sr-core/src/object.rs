//! Normalized, dialect-agnostic schema object model.
//!
//! Everything the engine compares is expressed as a [`SchemaObject`] keyed
//! by `(owner, name, object_type)`. Objects are immutable once loaded from
//! a side; downstream components hold references, never copies they mutate.

use crate::ident::{ObjectName, OwnerName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key for an object's comment text.
pub const ATTR_COMMENT: &str = "comment";
/// Attribute key for a trigger's enabled/disabled status.
pub const ATTR_TRIGGER_STATUS: &str = "trigger_status";
/// Attribute key for sequence options (start, increment, cache, cycle).
pub const ATTR_SEQUENCE_OPTIONS: &str = "sequence_options";
/// Attribute key for the table a trigger or sequence is bound to.
pub const ATTR_BOUND_TABLE: &str = "bound_table";
/// Attribute key for a synonym's referenced owner.
pub const ATTR_SYNONYM_TARGET_OWNER: &str = "synonym_target_owner";
/// Attribute key for a synonym's referenced object name.
pub const ATTR_SYNONYM_TARGET_NAME: &str = "synonym_target_name";

/// The kind of a schema object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Table,
    View,
    MaterializedView,
    Index,
    Constraint,
    Sequence,
    Trigger,
    Synonym,
    Package,
    PackageBody,
    Procedure,
    Function,
    TypeSpec,
    TypeBody,
    /// A type this build does not model; kept verbatim for reporting.
    #[serde(untagged)]
    Unknown(String),
}

impl ObjectType {
    /// Whether the target dialect supports `CREATE OR REPLACE` for this type.
    pub fn is_replaceable(&self) -> bool {
        matches!(
            self,
            Self::View
                | Self::Trigger
                | Self::Synonym
                | Self::Package
                | Self::PackageBody
                | Self::Procedure
                | Self::Function
                | Self::TypeSpec
                | Self::TypeBody
        )
    }

    /// The canonical wire form of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::MaterializedView => "MATERIALIZED_VIEW",
            Self::Index => "INDEX",
            Self::Constraint => "CONSTRAINT",
            Self::Sequence => "SEQUENCE",
            Self::Trigger => "TRIGGER",
            Self::Synonym => "SYNONYM",
            Self::Package => "PACKAGE",
            Self::PackageBody => "PACKAGE_BODY",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
            Self::TypeSpec => "TYPE_SPEC",
            Self::TypeBody => "TYPE_BODY",
            Self::Unknown(tag) => tag,
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog validity status of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectStatus {
    Valid,
    Invalid,
}

/// Which database a piece of metadata was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Canonical identity of a schema object.
///
/// The derived `Ord` (owner, then name, then type) is the canonical report
/// order: results sorted by `ObjectRef` are deterministic regardless of
/// worker count or completion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef {
    pub owner: OwnerName,
    pub name: ObjectName,
    pub object_type: ObjectType,
}

impl ObjectRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            owner: OwnerName::new(owner),
            name: ObjectName::new(name),
            object_type,
        }
    }

    /// `OWNER.NAME` without the type tag.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}.{}", self.object_type, self.owner, self.name)
    }
}

/// How one object references another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Generic catalog dependency (view on table, package on package, ...)
    HardReference,
    /// Trigger fires on a table
    TriggerOnTable,
    /// Synonym points at a base object
    SynonymTarget,
    /// Sequence drives a table column default
    SequenceOwner,
    /// Package body implements a package spec
    BodyOfSpec,
    /// Grant applies to an object
    GrantOnObject,
}

/// A dependency edge as reported by source-side metadata, before remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDependency {
    pub owner: OwnerName,
    pub name: ObjectName,
    pub object_type: ObjectType,
    pub kind: ReferenceKind,
}

/// One column of a table or view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<i32>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub default_expr: Option<String>,
    /// 1-based ordinal position within the relation
    pub position: u32,
}

fn default_true() -> bool {
    true
}

/// One index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    /// Full definition text when the catalog exposes one (functional indexes)
    #[serde(default)]
    pub definition: Option<String>,
}

/// Kind of a declarative constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

/// One constraint on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintMeta {
    pub name: String,
    pub kind: ConstraintKind,
    #[serde(default)]
    pub columns: Vec<String>,
    /// Check/FK expression text when applicable
    #[serde(default)]
    pub expression: Option<String>,
}

/// One granted privilege on an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantMeta {
    pub grantee: String,
    pub privilege: String,
    #[serde(default)]
    pub grantable: bool,
}

/// A normalized schema object as loaded from one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    pub object_type: ObjectType,
    pub owner: OwnerName,
    pub name: ObjectName,
    #[serde(default = "default_status")]
    pub status: ObjectStatus,
    #[serde(default)]
    pub columns: Vec<ColumnMeta>,
    #[serde(default)]
    pub indexes: Vec<IndexMeta>,
    #[serde(default)]
    pub constraints: Vec<ConstraintMeta>,
    #[serde(default)]
    pub grants: Vec<GrantMeta>,
    #[serde(default)]
    pub dependencies: Vec<RawDependency>,
    /// Scalar facets keyed by the `ATTR_*` constants
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    /// Captured DDL text, when the extractor supplied it inline
    #[serde(default)]
    pub ddl: Option<String>,
}

fn default_status() -> ObjectStatus {
    ObjectStatus::Valid
}

impl SchemaObject {
    /// Create a bare object with no attributes.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            object_type,
            owner: OwnerName::new(owner),
            name: ObjectName::new(name),
            status: ObjectStatus::Valid,
            columns: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            grants: Vec::new(),
            dependencies: Vec::new(),
            attributes: BTreeMap::new(),
            ddl: None,
        }
    }

    /// This object's canonical identity.
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            owner: self.owner.clone(),
            name: self.name.clone(),
            object_type: self.object_type.clone(),
        }
    }

    /// A string attribute, if present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    /// For synonyms: the referenced `(owner, name)`, if recorded.
    pub fn synonym_target(&self) -> Option<(OwnerName, ObjectName)> {
        let owner = OwnerName::try_new(self.attr_str(ATTR_SYNONYM_TARGET_OWNER)?)?;
        let name = ObjectName::try_new(self.attr_str(ATTR_SYNONYM_TARGET_NAME)?)?;
        Some((owner, name))
    }
}

#[cfg(test)]
#[path = "object_test.rs"]
mod tests;
