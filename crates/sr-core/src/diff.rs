//! Facet-wise comparison of a source object against its target counterpart.
//!
//! Each comparable facet that differs in raw form produces one
//! [`AttributeDiff`]. Normalization runs first; a facet that differs only
//! in dialect representation is still reported, but with
//! `normalized_equal = true` and a suppression tag, so downstream
//! consumers can tell representation drift from semantic drift.

use crate::normalize::{compare_column_types, exprs_equivalent, TypeComparison};
use crate::object::{
    ColumnMeta, ObjectType, SchemaObject, ATTR_COMMENT, ATTR_SEQUENCE_OPTIONS, ATTR_TRIGGER_STATUS,
};
use crate::reason::{ReasonCode, SuppressionTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which facet of an object a diff concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "facet", rename_all = "snake_case")]
pub enum DiffKind {
    /// Object exists on one side only
    Existence,
    /// Column names present on one side only
    ColumnSet,
    /// Same columns, different ordinal positions
    ColumnOrder,
    /// Declared type differs for one column
    ColumnType { column: String },
    /// Nullability differs for one column
    Nullability { column: String },
    /// Default expression differs for one column
    DefaultExpr { column: String },
    /// Index definition differs or index is missing
    IndexDefinition { index: String },
    /// Constraint expression/shape differs or constraint is missing
    ConstraintExpr { constraint: String },
    /// Sequence options differ
    SequenceOptions,
    /// Trigger enabled/disabled status differs
    TriggerStatus,
    /// Comment text differs
    Comment,
    /// Facet could not be compared; reason recorded
    Incomparable { attribute: String, reason: ReasonCode },
}

/// A structural difference for one comparable facet of an object.
///
/// Created during comparison and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDiff {
    pub kind: DiffKind,
    pub source_value: Option<String>,
    pub target_value: Option<String>,
    /// True when normalization proves the difference is representational
    pub normalized_equal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppression: Option<SuppressionTag>,
}

impl AttributeDiff {
    fn drift(kind: DiffKind, source: Option<String>, target: Option<String>) -> Self {
        Self {
            kind,
            source_value: source,
            target_value: target,
            normalized_equal: false,
            suppression: None,
        }
    }

    fn suppressed(
        kind: DiffKind,
        source: Option<String>,
        target: Option<String>,
        tag: SuppressionTag,
    ) -> Self {
        Self {
            kind,
            source_value: source,
            target_value: target,
            normalized_equal: true,
            suppression: Some(tag),
        }
    }

    /// Whether this diff represents real, actionable drift.
    pub fn is_actionable(&self) -> bool {
        !self.normalized_equal && !matches!(self.kind, DiffKind::Incomparable { .. })
    }
}

/// Compare two sides of the same object.
///
/// `existence_only` limits the comparison to existence for object kinds
/// where attribute-level drift is deliberately not computed.
pub fn diff_objects(
    source: &SchemaObject,
    target: &SchemaObject,
    existence_only: bool,
) -> Vec<AttributeDiff> {
    if existence_only {
        // Both sides exist by construction here; nothing more to compare.
        return vec![AttributeDiff::suppressed(
            DiffKind::Existence,
            Some(source.object_ref().to_string()),
            Some(target.object_ref().to_string()),
            SuppressionTag::ExistenceOnlyKind,
        )];
    }

    let mut diffs = Vec::new();

    match source.object_type {
        ObjectType::Table | ObjectType::View | ObjectType::MaterializedView => {
            diff_columns(source, target, &mut diffs);
            diff_indexes(source, target, &mut diffs);
            diff_constraints(source, target, &mut diffs);
        }
        ObjectType::Sequence => {
            diff_scalar_attr(source, target, ATTR_SEQUENCE_OPTIONS, DiffKind::SequenceOptions, &mut diffs);
        }
        ObjectType::Trigger => {
            diff_scalar_attr(source, target, ATTR_TRIGGER_STATUS, DiffKind::TriggerStatus, &mut diffs);
        }
        _ => {}
    }

    diff_comment(source, target, &mut diffs);

    diffs
}

fn column_map(obj: &SchemaObject) -> BTreeMap<&str, &ColumnMeta> {
    obj.columns.iter().map(|c| (c.name.as_str(), c)).collect()
}

fn diff_columns(source: &SchemaObject, target: &SchemaObject, diffs: &mut Vec<AttributeDiff>) {
    let source_cols = column_map(source);
    let target_cols = column_map(target);

    let only_source: Vec<&str> = source_cols
        .keys()
        .filter(|k| !target_cols.contains_key(**k))
        .copied()
        .collect();
    let only_target: Vec<&str> = target_cols
        .keys()
        .filter(|k| !source_cols.contains_key(**k))
        .copied()
        .collect();

    if !only_source.is_empty() || !only_target.is_empty() {
        diffs.push(AttributeDiff::drift(
            DiffKind::ColumnSet,
            Some(only_source.join(",")),
            Some(only_target.join(",")),
        ));
    } else {
        // Same set: compare ordinal order.
        let mut by_pos_source: Vec<&str> = source.columns.iter().map(|c| c.name.as_str()).collect();
        let mut by_pos_target: Vec<&str> = target.columns.iter().map(|c| c.name.as_str()).collect();
        by_pos_source.sort_by_key(|n| source_cols[n].position);
        by_pos_target.sort_by_key(|n| target_cols[n].position);
        if by_pos_source != by_pos_target {
            diffs.push(AttributeDiff::drift(
                DiffKind::ColumnOrder,
                Some(by_pos_source.join(",")),
                Some(by_pos_target.join(",")),
            ));
        }
    }

    for (name, source_col) in &source_cols {
        let Some(target_col) = target_cols.get(name) else {
            continue;
        };

        if source_col.data_type.is_empty() || target_col.data_type.is_empty() {
            diffs.push(AttributeDiff::drift(
                DiffKind::Incomparable {
                    attribute: format!("column type of {name}"),
                    reason: ReasonCode::MetadataGap,
                },
                None,
                None,
            ));
            continue;
        }

        let kind = DiffKind::ColumnType {
            column: (*name).to_string(),
        };
        match compare_column_types(source_col, target_col) {
            TypeComparison::ExactMatch => {}
            TypeComparison::NormalizedMatch(tag) => diffs.push(AttributeDiff::suppressed(
                kind,
                Some(render_type(source_col)),
                Some(render_type(target_col)),
                tag,
            )),
            TypeComparison::Mismatch => diffs.push(AttributeDiff::drift(
                kind,
                Some(render_type(source_col)),
                Some(render_type(target_col)),
            )),
        }

        if source_col.nullable != target_col.nullable {
            diffs.push(AttributeDiff::drift(
                DiffKind::Nullability {
                    column: (*name).to_string(),
                },
                Some(source_col.nullable.to_string()),
                Some(target_col.nullable.to_string()),
            ));
        }

        diff_default_expr(name, source_col, target_col, diffs);
    }
}

fn diff_default_expr(
    name: &str,
    source_col: &ColumnMeta,
    target_col: &ColumnMeta,
    diffs: &mut Vec<AttributeDiff>,
) {
    let kind = DiffKind::DefaultExpr {
        column: name.to_string(),
    };
    match (&source_col.default_expr, &target_col.default_expr) {
        (Some(s), Some(t)) if s == t => {}
        (Some(s), Some(t)) if exprs_equivalent(s, t) => diffs.push(AttributeDiff::suppressed(
            kind,
            Some(s.clone()),
            Some(t.clone()),
            SuppressionTag::NormalizedExpression,
        )),
        (None, None) => {}
        (s, t) => diffs.push(AttributeDiff::drift(kind, s.clone(), t.clone())),
    }
}

fn diff_indexes(source: &SchemaObject, target: &SchemaObject, diffs: &mut Vec<AttributeDiff>) {
    let target_idx: BTreeMap<&str, &crate::object::IndexMeta> =
        target.indexes.iter().map(|i| (i.name.as_str(), i)).collect();

    for idx in &source.indexes {
        let kind = DiffKind::IndexDefinition {
            index: idx.name.clone(),
        };
        let Some(t) = target_idx.get(idx.name.as_str()) else {
            diffs.push(AttributeDiff::drift(kind, Some(render_index(idx)), None));
            continue;
        };

        let shape_equal = idx.columns == t.columns && idx.unique == t.unique;
        let def_equal = match (&idx.definition, &t.definition) {
            (Some(a), Some(b)) => exprs_equivalent(a, b),
            (None, None) => true,
            _ => false,
        };
        if shape_equal && def_equal {
            continue;
        }
        if shape_equal || definitions_normalize_equal(idx, t) {
            diffs.push(AttributeDiff::suppressed(
                kind,
                Some(render_index(idx)),
                Some(render_index(t)),
                SuppressionTag::NormalizedExpression,
            ));
        } else {
            diffs.push(AttributeDiff::drift(
                kind,
                Some(render_index(idx)),
                Some(render_index(t)),
            ));
        }
    }
}

fn definitions_normalize_equal(a: &crate::object::IndexMeta, b: &crate::object::IndexMeta) -> bool {
    match (&a.definition, &b.definition) {
        (Some(x), Some(y)) => exprs_equivalent(x, y),
        _ => false,
    }
}

fn diff_constraints(source: &SchemaObject, target: &SchemaObject, diffs: &mut Vec<AttributeDiff>) {
    let target_cons: BTreeMap<&str, &crate::object::ConstraintMeta> = target
        .constraints
        .iter()
        .map(|c| (c.name.as_str(), c))
        .collect();

    for con in &source.constraints {
        let kind = DiffKind::ConstraintExpr {
            constraint: con.name.clone(),
        };
        let Some(t) = target_cons.get(con.name.as_str()) else {
            diffs.push(AttributeDiff::drift(kind, Some(render_constraint(con)), None));
            continue;
        };

        if con.kind != t.kind || con.columns != t.columns {
            diffs.push(AttributeDiff::drift(
                kind,
                Some(render_constraint(con)),
                Some(render_constraint(t)),
            ));
            continue;
        }

        match (&con.expression, &t.expression) {
            (Some(a), Some(b)) if a == b => {}
            (Some(a), Some(b)) if exprs_equivalent(a, b) => {
                diffs.push(AttributeDiff::suppressed(
                    kind,
                    Some(a.clone()),
                    Some(b.clone()),
                    SuppressionTag::NormalizedExpression,
                ));
            }
            (None, None) => {}
            (a, b) => diffs.push(AttributeDiff::drift(kind, a.clone(), b.clone())),
        }
    }
}

fn diff_scalar_attr(
    source: &SchemaObject,
    target: &SchemaObject,
    key: &str,
    kind: DiffKind,
    diffs: &mut Vec<AttributeDiff>,
) {
    let s = source.attributes.get(key);
    let t = target.attributes.get(key);
    match (s, t) {
        (Some(a), Some(b)) if a == b => {}
        (None, None) => {}
        // One side did not report the attribute at all: that is a
        // metadata gap in either direction, not drift.
        (Some(_), None) | (None, Some(_)) => diffs.push(AttributeDiff::drift(
            DiffKind::Incomparable {
                attribute: key.to_string(),
                reason: ReasonCode::MetadataGap,
            },
            s.map(|v| v.to_string()),
            t.map(|v| v.to_string()),
        )),
        (a, b) => diffs.push(AttributeDiff::drift(
            kind,
            a.map(|v| v.to_string()),
            b.map(|v| v.to_string()),
        )),
    }
}

fn diff_comment(source: &SchemaObject, target: &SchemaObject, diffs: &mut Vec<AttributeDiff>) {
    let s = source.attr_str(ATTR_COMMENT);
    let t = target.attr_str(ATTR_COMMENT);
    if s != t {
        diffs.push(AttributeDiff::drift(
            DiffKind::Comment,
            s.map(str::to_string),
            t.map(str::to_string),
        ));
    }
}

fn render_type(col: &ColumnMeta) -> String {
    match (col.precision, col.scale) {
        (Some(p), Some(s)) => format!("{}({},{})", col.data_type, p, s),
        (Some(p), None) => format!("{}({})", col.data_type, p),
        _ => col.data_type.clone(),
    }
}

fn render_index(idx: &crate::object::IndexMeta) -> String {
    let uniq = if idx.unique { "UNIQUE " } else { "" };
    format!("{}({})", uniq, idx.columns.join(","))
}

fn render_constraint(con: &crate::object::ConstraintMeta) -> String {
    format!("{:?}({})", con.kind, con.columns.join(","))
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
