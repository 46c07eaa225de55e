//! The compatibility classifier.
//!
//! Classification runs in two passes. The first pass assigns each source
//! object its own status from the rule set, the built-in type checks, and
//! target-side existence. The second pass propagates BLOCKED outward from
//! every UNSUPPORTED object across the dependency graph, recording a
//! root-cause chain for each blocked object.
//!
//! The whole computation is a pure function of (model, remap, graph,
//! rules, config, target version): re-running with unchanged inputs
//! yields byte-identical results.

use crate::error::ClassifyResult;
use crate::result::{ClassificationResult, RootCauseEntry, Status};
use crate::rules::{ClassificationRule, RuleSet, Verdict};
use crate::version::FeatureVersion;
use sr_core::config::EngineConfig;
use sr_core::diff::diff_objects;
use sr_core::graph::DependencyGraph;
use sr_core::model::ObjectModel;
use sr_core::normalize::is_legacy_lob;
use sr_core::object::{ObjectRef, ObjectType, SchemaObject, Side};
use sr_core::reason::ReasonCode;
use sr_core::summary::RunSummary;
use sr_remap::RemapMap;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// The full output of one classification run.
#[derive(Debug, serde::Serialize)]
pub struct ClassificationReport {
    /// One result per source object, in canonical order of the remapped
    /// identity.
    pub results: Vec<ClassificationResult>,
    /// Cyclic dependency groups, reported for fixup-ordering fallback.
    pub cycle_groups: Vec<Vec<ObjectRef>>,
}

impl ClassificationReport {
    pub fn result_for(&self, object: &ObjectRef) -> Option<&ClassificationResult> {
        self.results.iter().find(|r| r.object == *object)
    }

    pub fn count_with(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// What the rule pass concluded about one object, before the existence
/// check runs.
struct RulePassOutcome {
    verdict: Option<Verdict>,
    reason: Option<ReasonCode>,
    blacklist_source: Option<String>,
}

/// The classifier.
pub struct Classifier<'a> {
    config: &'a EngineConfig,
    rules: &'a RuleSet,
    target_version: FeatureVersion,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a EngineConfig, rules: &'a RuleSet, target_version: FeatureVersion) -> Self {
        Self {
            config,
            rules,
            target_version,
        }
    }

    /// Classify every source object against the target model.
    pub fn classify(
        &self,
        model: &ObjectModel,
        remap: &RemapMap,
        graph: &DependencyGraph,
        summary: &mut RunSummary,
    ) -> ClassifyResult<ClassificationReport> {
        model.require_target()?;

        let active_rules = self.rules.active(&self.target_version, summary);

        // Pass 1: per-object status, keyed by remapped identity.
        let mut results: BTreeMap<ObjectRef, ClassificationResult> = BTreeMap::new();
        for object in model.objects(Side::Source) {
            let source_ref = object.object_ref();
            let target_ref = remap.target_of(&source_ref);

            if results.contains_key(&target_ref) {
                log::warn!(
                    "remap collision: {source_ref} also resolves to {target_ref}; keeping first"
                );
                summary.record_failure(
                    Some(source_ref),
                    ReasonCode::AmbiguousRemap,
                    format!("collides with an earlier object at {target_ref}"),
                );
                continue;
            }
            let result = self.classify_one(object, &source_ref, &target_ref, &active_rules, model, summary);
            results.insert(target_ref, result);
        }

        // Pass 2: BLOCKED propagation from UNSUPPORTED roots.
        let cycle_groups = graph.cycle_groups();
        self.propagate_blocked(&mut results, graph, &cycle_groups);

        Ok(ClassificationReport {
            results: results.into_values().collect(),
            cycle_groups,
        })
    }

    fn classify_one(
        &self,
        object: &SchemaObject,
        source_ref: &ObjectRef,
        target_ref: &ObjectRef,
        active_rules: &[&ClassificationRule],
        model: &ObjectModel,
        summary: &mut RunSummary,
    ) -> ClassificationResult {
        let base = |status: Status, reason: ReasonCode| ClassificationResult {
            object: target_ref.clone(),
            source: source_ref.clone(),
            status,
            reason,
            root_cause_chain: Vec::new(),
            blacklist_source: None,
            diffs: Vec::new(),
        };

        // Unmodeled object kinds are excluded from comparison, not guessed at.
        if let ObjectType::Unknown(tag) = &object.object_type {
            summary.record_skip(
                source_ref.clone(),
                ReasonCode::MetadataGap,
                format!("object type {tag} is not modeled"),
            );
            return base(Status::Skipped, ReasonCode::MetadataGap);
        }

        let outcome = self.run_rules(object, source_ref, active_rules, summary);

        if let Some(Verdict::Skip) = outcome.verdict {
            let reason = outcome.reason.unwrap_or(ReasonCode::RuleSkipped);
            summary.record_skip(source_ref.clone(), reason.clone(), "excluded by rule");
            let mut result = base(Status::Skipped, reason);
            result.blacklist_source = outcome.blacklist_source;
            return result;
        }

        let target_object = model.get(Side::Target, target_ref);

        // A hard verdict is demoted to advisory when the target already
        // carries the object: it migrated once, so it is a conversion
        // concern for reporting, not a blocker.
        let unsupported = matches!(outcome.verdict, Some(Verdict::Unsupported));
        let legacy_lob = object.columns.iter().any(|c| is_legacy_lob(&c.data_type));
        if (unsupported || legacy_lob) && target_object.is_none() {
            let reason = outcome
                .reason
                .clone()
                .unwrap_or(ReasonCode::DeprecatedType);
            let mut result = base(Status::Unsupported, reason);
            result.blacklist_source = outcome.blacklist_source;
            return result;
        }

        let advisory = unsupported || legacy_lob || matches!(outcome.verdict, Some(Verdict::Advisory));
        let advisory_reason = if advisory {
            Some(outcome.reason.clone().unwrap_or(ReasonCode::DeprecatedType))
        } else {
            None
        };

        let Some(target_object) = target_object else {
            let mut result = base(Status::Missing, ReasonCode::NotInTarget);
            result.blacklist_source = outcome.blacklist_source;
            return result;
        };

        let existence_only = self.config.is_existence_only(&object.object_type);
        let diffs = diff_objects(object, target_object, existence_only);

        let reason = match advisory_reason {
            Some(reason) => {
                summary.record_fallback(
                    Some(source_ref.clone()),
                    reason.clone(),
                    "tracked as advisory; object already present on target",
                );
                reason
            }
            None if existence_only => ReasonCode::ExistenceOnly,
            None => ReasonCode::Compatible,
        };

        let mut result = base(Status::Ok, reason);
        result.blacklist_source = outcome.blacklist_source;
        result.diffs = diffs;
        result
    }

    /// First matching rule wins per verdict class; a rule whose evaluation
    /// fails is isolated, recorded, and does not poison the others.
    fn run_rules(
        &self,
        object: &SchemaObject,
        source_ref: &ObjectRef,
        active_rules: &[&ClassificationRule],
        summary: &mut RunSummary,
    ) -> RulePassOutcome {
        let mut advisory: Option<&ClassificationRule> = None;
        for rule in active_rules {
            match rule.evaluate(object) {
                Ok(false) => {}
                Ok(true) => match rule.verdict {
                    Verdict::Unsupported | Verdict::Skip => {
                        return RulePassOutcome {
                            verdict: Some(rule.verdict),
                            reason: Some(rule.reason_code.clone()),
                            blacklist_source: rule.source.clone().or_else(|| Some(rule.id.clone())),
                        };
                    }
                    Verdict::Advisory => {
                        advisory.get_or_insert(*rule);
                    }
                },
                Err(e) => {
                    log::warn!("rule {} failed on {source_ref}: {e:?}; skipping rule", rule.id);
                    summary.record_failure(
                        Some(source_ref.clone()),
                        ReasonCode::MetadataGap,
                        format!("rule {} could not be evaluated: {e:?}", rule.id),
                    );
                }
            }
        }
        match advisory {
            Some(rule) => RulePassOutcome {
                verdict: Some(Verdict::Advisory),
                reason: Some(rule.reason_code.clone()),
                blacklist_source: rule.source.clone().or_else(|| Some(rule.id.clone())),
            },
            None => RulePassOutcome {
                verdict: None,
                reason: None,
                blacklist_source: None,
            },
        }
    }

    /// Breadth-first spread of BLOCKED from every UNSUPPORTED object over
    /// the dependent edges. Chains are memoized: a dependent two hops out
    /// gets its parent's chain with the parent prepended, so the last
    /// entry of every chain is the unsupported root.
    fn propagate_blocked(
        &self,
        results: &mut BTreeMap<ObjectRef, ClassificationResult>,
        graph: &DependencyGraph,
        cycle_groups: &[Vec<ObjectRef>],
    ) {
        let cyclic: BTreeSet<&ObjectRef> = cycle_groups.iter().flatten().collect();

        let roots: Vec<ObjectRef> = results
            .values()
            .filter(|r| r.status == Status::Unsupported)
            .map(|r| r.object.clone())
            .collect();

        let mut chains: BTreeMap<ObjectRef, Vec<RootCauseEntry>> = BTreeMap::new();
        let mut queue: VecDeque<ObjectRef> = roots.iter().cloned().collect();

        while let Some(node) = queue.pop_front() {
            // The chain a dependent of `node` inherits: `node` itself plus
            // whatever `node` inherited. Roots contribute their own reason.
            let node_entry = match results.get(&node) {
                Some(r) if r.status == Status::Unsupported => RootCauseEntry {
                    object: node.clone(),
                    reason: r.reason.clone(),
                },
                _ => RootCauseEntry {
                    object: node.clone(),
                    reason: ReasonCode::BlockedByDependency,
                },
            };
            let mut inherited = vec![node_entry];
            if let Some(parent_chain) = chains.get(&node) {
                inherited.extend(parent_chain.iter().cloned());
            }

            for dependent in graph.dependents_of(&node) {
                if chains.contains_key(&dependent) {
                    continue;
                }
                if let Some(r) = results.get(&dependent) {
                    if matches!(r.status, Status::Unsupported | Status::Skipped) {
                        continue;
                    }
                }
                chains.insert(dependent.clone(), inherited.clone());
                queue.push_back(dependent);
            }
        }

        for (object, chain) in chains {
            let Some(result) = results.get_mut(&object) else {
                continue; // graph node outside the managed set
            };
            result.status = Status::Blocked;
            result.reason = if cyclic.contains(&object) {
                ReasonCode::BlockedByCycle
            } else {
                ReasonCode::BlockedByDependency
            };
            result.root_cause_chain = chain;
            result.diffs.clear();
        }
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
