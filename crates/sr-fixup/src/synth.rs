//! Dependency-ordered fixup synthesis.
//!
//! Turns a classification report into an executable plan. Only MISSING
//! objects produce create actions; OK objects contribute grant backfills,
//! with any other actionable drift recorded as a manual-fixup event;
//! UNSUPPORTED, BLOCKED, and SKIPPED objects never produce fixups and are
//! left to the report for manual refactoring.
//!
//! Ordering is `(layer, phase, object)`: an object's prerequisite grants
//! land before it, its creation next, its own grants after, and every
//! dependent follows in a later layer. Members of a cyclic group share a
//! layer and fall back to lexical order with a warning.

use crate::error::FixupResult;
use crate::rewrite::DdlRewriter;
use crate::wrap::{mode_for, wrap_statement};
use serde::Serialize;
use sr_classify::{ClassificationReport, Status};
use sr_core::config::{EngineConfig, IdempotencyMode};
use sr_core::graph::DependencyGraph;
use sr_core::model::ObjectModel;
use sr_core::object::{GrantMeta, ObjectRef, SchemaObject, Side};
use sr_core::reason::ReasonCode;
use sr_core::summary::RunSummary;
use sr_meta::DdlSource;
use sr_remap::RemapMap;
use std::collections::{BTreeMap, BTreeSet};

/// Where an action sits relative to its object's creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Grants an existing object needs before dependents build on it
    PreGrant,
    /// The object's own DDL
    Create,
    /// Grants on a newly created object
    PostGrant,
}

/// Total order over plan actions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct OrderingKey {
    pub layer: usize,
    pub phase: Phase,
    pub object: ObjectRef,
}

/// One executable unit of the plan.
#[derive(Debug, Clone, Serialize)]
pub struct FixupAction {
    pub object: ObjectRef,
    pub ddl_statements: Vec<String>,
    pub idempotency: IdempotencyMode,
    pub ordering_key: OrderingKey,
}

/// The full ordered plan.
#[derive(Debug, Default, Serialize)]
pub struct FixupPlan {
    pub actions: Vec<FixupAction>,
}

impl FixupPlan {
    /// Every statement in execution order.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .flat_map(|a| a.ddl_statements.iter().map(String::as_str))
    }

    pub fn action_for(&self, object: &ObjectRef) -> Option<&FixupAction> {
        self.actions
            .iter()
            .find(|a| a.object == *object && a.ordering_key.phase == Phase::Create)
    }
}

/// The fixup synthesizer.
pub struct FixupSynthesizer<'a> {
    config: &'a EngineConfig,
}

impl<'a> FixupSynthesizer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Synthesize the ordered fixup plan for one classification report.
    pub fn synthesize(
        &self,
        model: &ObjectModel,
        remap: &RemapMap,
        graph: &DependencyGraph,
        report: &ClassificationReport,
        ddl_source: Option<&dyn DdlSource>,
        summary: &mut RunSummary,
    ) -> FixupResult<FixupPlan> {
        let rewriter = DdlRewriter::from_remap(remap);
        let layer_index = layer_index(graph);
        let mut actions: Vec<FixupAction> = Vec::new();

        let missing: BTreeSet<&ObjectRef> = report
            .results
            .iter()
            .filter(|r| r.status == Status::Missing)
            .map(|r| &r.object)
            .collect();
        self.warn_cyclic_creates(report, &missing, summary);

        for result in &report.results {
            let layer = layer_index.get(&result.object).copied().unwrap_or(0);
            match result.status {
                Status::Missing => {
                    let Some(source) = model.get(Side::Source, &result.source) else {
                        summary.record_failure(
                            Some(result.object.clone()),
                            ReasonCode::MetadataGap,
                            "classified object missing from the source model",
                        );
                        continue;
                    };
                    let Some(ddl) = self.extract_ddl(source, &result.source, ddl_source, summary)
                    else {
                        continue;
                    };

                    let rewritten = rewriter.rewrite(&ddl);
                    let mode = mode_for(&result.object.object_type, self.config.guard_mode);
                    let statements = wrap_statement(&result.object, &rewritten, mode)?;
                    actions.push(FixupAction {
                        object: result.object.clone(),
                        ddl_statements: statements,
                        idempotency: mode,
                        ordering_key: OrderingKey {
                            layer,
                            phase: Phase::Create,
                            object: result.object.clone(),
                        },
                    });

                    if !source.grants.is_empty() {
                        actions.push(grant_action(
                            &result.object,
                            &source.grants,
                            layer,
                            Phase::PostGrant,
                        ));
                    }
                }
                Status::Ok => {
                    // Non-grant drift on an existing object is never
                    // rewritten in place; it is surfaced for an operator.
                    let drifted: Vec<String> = result
                        .diffs
                        .iter()
                        .filter(|d| d.is_actionable())
                        .map(|d| format!("{:?}", d.kind))
                        .collect();
                    if !drifted.is_empty() {
                        summary.record_fallback(
                            Some(result.object.clone()),
                            ReasonCode::ManualFixup,
                            format!("drift not synthesized: {}", drifted.join(", ")),
                        );
                    }

                    // Backfill grants present on the source but absent on
                    // the target.
                    let (Some(source), Some(target)) = (
                        model.get(Side::Source, &result.source),
                        model.get(Side::Target, &result.object),
                    ) else {
                        continue;
                    };
                    let needed: Vec<GrantMeta> = source
                        .grants
                        .iter()
                        .filter(|g| !target.grants.contains(g))
                        .cloned()
                        .collect();
                    if !needed.is_empty() {
                        actions.push(grant_action(
                            &result.object,
                            &needed,
                            layer,
                            Phase::PreGrant,
                        ));
                    }
                }
                Status::Unsupported | Status::Blocked | Status::Skipped => {}
            }
        }

        actions.sort_by(|a, b| a.ordering_key.cmp(&b.ordering_key));
        Ok(FixupPlan { actions })
    }

    /// Captured DDL from the model, then the external source chain. Both
    /// missing is a recorded skip, never an error.
    fn extract_ddl(
        &self,
        source: &SchemaObject,
        source_ref: &ObjectRef,
        ddl_source: Option<&dyn DdlSource>,
        summary: &mut RunSummary,
    ) -> Option<String> {
        if let Some(ddl) = &source.ddl {
            return Some(ddl.clone());
        }
        if let Some(provider) = ddl_source {
            match provider.ddl(source_ref) {
                Ok(ddl) => return Some(ddl),
                Err(e) => {
                    log::warn!("DDL extraction failed for {source_ref}: {e}");
                }
            }
        }
        summary.record_skip(
            source_ref.clone(),
            ReasonCode::DdlUnavailable,
            "no captured or extractable DDL; fixup skipped",
        );
        None
    }

    fn warn_cyclic_creates(
        &self,
        report: &ClassificationReport,
        missing: &BTreeSet<&ObjectRef>,
        summary: &mut RunSummary,
    ) {
        for group in &report.cycle_groups {
            if group.iter().any(|m| missing.contains(m)) {
                let members: Vec<String> = group.iter().map(ObjectRef::to_string).collect();
                log::warn!(
                    "cyclic group ordered lexically within its layer: {}",
                    members.join(", ")
                );
                summary.record_fallback(
                    None,
                    ReasonCode::BlockedByCycle,
                    format!("lexical ordering fallback for cycle: {}", members.join(", ")),
                );
            }
        }
    }
}

fn layer_index(graph: &DependencyGraph) -> BTreeMap<ObjectRef, usize> {
    let mut index = BTreeMap::new();
    for (layer, members) in graph.topo_layers().into_iter().enumerate() {
        for member in members {
            index.insert(member, layer);
        }
    }
    index
}

fn grant_action(
    object: &ObjectRef,
    grants: &[GrantMeta],
    layer: usize,
    phase: Phase,
) -> FixupAction {
    let statements = grants.iter().map(|g| grant_sql(g, object)).collect();
    FixupAction {
        object: object.clone(),
        ddl_statements: statements,
        idempotency: IdempotencyMode::None,
        ordering_key: OrderingKey {
            layer,
            phase,
            object: object.clone(),
        },
    }
}

fn grant_sql(grant: &GrantMeta, object: &ObjectRef) -> String {
    let mut sql = format!(
        "GRANT {} ON {} TO {}",
        grant.privilege,
        object.qualified_name(),
        grant.grantee
    );
    if grant.grantable {
        sql.push_str(" WITH GRANT OPTION");
    }
    sql
}

#[cfg(test)]
#[path = "synth_test.rs"]
mod tests;
