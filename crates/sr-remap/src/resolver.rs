//! Remap resolution: assign every source object a target identity.
//!
//! Precedence is fixed: explicit rule, then inference policy for bound
//! kinds, then the default policy (keep the source schema). Resolution is
//! a pure function of (object identity, rule set, model), so re-running
//! with unchanged inputs yields identical edges.

use crate::rules::{InferencePolicy, RemapRuleSet};
use serde::{Deserialize, Serialize};
use sr_core::ident::{ObjectName, OwnerName};
use sr_core::model::ObjectModel;
use sr_core::object::{ObjectRef, ObjectType, SchemaObject, Side, ATTR_BOUND_TABLE};
use sr_core::reason::ReasonCode;
use sr_core::summary::RunSummary;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// How a remap edge came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleOrigin {
    Explicit,
    Inferred,
    PolicyDefault,
}

/// The resolved target identity for one source object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapEdge {
    pub source: ObjectRef,
    pub target_owner: OwnerName,
    pub target_name: ObjectName,
    pub origin: RuleOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<InferencePolicy>,
}

impl RemapEdge {
    /// The target-side identity (object type carries over).
    pub fn target_ref(&self) -> ObjectRef {
        ObjectRef {
            owner: self.target_owner.clone(),
            name: self.target_name.clone(),
            object_type: self.source.object_type.clone(),
        }
    }

    /// Whether the edge actually moves or renames the object.
    pub fn is_identity(&self) -> bool {
        self.target_owner == self.source.owner && self.target_name == self.source.name
    }
}

/// All resolved edges, keyed by source identity. At most one edge per
/// object by construction.
#[derive(Debug, Default)]
pub struct RemapMap {
    edges: BTreeMap<ObjectRef, RemapEdge>,
}

impl RemapMap {
    pub fn get(&self, source: &ObjectRef) -> Option<&RemapEdge> {
        self.edges.get(source)
    }

    /// Remapped identity of any reference; identity mapping when the
    /// object is not managed (no edge).
    pub fn target_of(&self, source: &ObjectRef) -> ObjectRef {
        self.edges
            .get(source)
            .map(RemapEdge::target_ref)
            .unwrap_or_else(|| source.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectRef, &RemapEdge)> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Object kinds resolved in the second pass, after their base objects.
fn is_bound_kind(object_type: &ObjectType) -> bool {
    matches!(
        object_type,
        ObjectType::Trigger
            | ObjectType::Sequence
            | ObjectType::Synonym
            | ObjectType::Index
            | ObjectType::Constraint
            | ObjectType::PackageBody
            | ObjectType::TypeBody
    )
}

/// The remap resolver.
pub struct RemapResolver<'a> {
    rules: &'a RemapRuleSet,
}

impl<'a> RemapResolver<'a> {
    pub fn new(rules: &'a RemapRuleSet) -> Self {
        Self { rules }
    }

    /// Resolve every source object to a target identity.
    ///
    /// Standalone kinds resolve first (explicit rule or default policy);
    /// bound kinds then resolve against their base object's edge.
    pub fn resolve_all(&self, model: &ObjectModel, summary: &mut RunSummary) -> RemapMap {
        let mut map = RemapMap::default();

        for object in model.objects(Side::Source) {
            if is_bound_kind(&object.object_type) {
                continue;
            }
            let edge = self.resolve_standalone(object);
            map.edges.insert(object.object_ref(), edge);
        }

        for object in model.objects(Side::Source) {
            if !is_bound_kind(&object.object_type) {
                continue;
            }
            let edge = self.resolve_bound(object, model, &map, summary);
            map.edges.insert(object.object_ref(), edge);
        }

        map
    }

    /// Explicit rule or default policy; no inference involved.
    fn resolve_standalone(&self, object: &SchemaObject) -> RemapEdge {
        let source = object.object_ref();
        if let Some(rule) =
            self.rules
                .explicit_match(&object.owner, &object.name, &object.object_type)
        {
            return RemapEdge {
                source,
                target_owner: OwnerName::new(rule.target_owner.clone()),
                target_name: rule
                    .target_name
                    .clone()
                    .map(ObjectName::new)
                    .unwrap_or_else(|| object.name.clone()),
                origin: RuleOrigin::Explicit,
                policy: None,
            };
        }
        Self::default_edge(source)
    }

    fn resolve_bound(
        &self,
        object: &SchemaObject,
        model: &ObjectModel,
        resolved: &RemapMap,
        summary: &mut RunSummary,
    ) -> RemapEdge {
        let source = object.object_ref();

        // Explicit rules outrank every policy, bound kind or not.
        if let Some(rule) =
            self.rules
                .explicit_match(&object.owner, &object.name, &object.object_type)
        {
            return RemapEdge {
                source,
                target_owner: OwnerName::new(rule.target_owner.clone()),
                target_name: rule
                    .target_name
                    .clone()
                    .map(ObjectName::new)
                    .unwrap_or_else(|| object.name.clone()),
                origin: RuleOrigin::Explicit,
                policy: None,
            };
        }

        let policy = self.rules.policy_for(&object.object_type);

        // A PUBLIC synonym relocated into the base object's schema would
        // stop being public; it never moves.
        if object.object_type == ObjectType::Synonym && object.owner.is_public() {
            return RemapEdge {
                policy: Some(policy),
                ..Self::default_edge(source)
            };
        }

        match policy {
            InferencePolicy::SourceOnly => RemapEdge {
                policy: Some(policy),
                ..Self::default_edge(source)
            },
            InferencePolicy::Infer => {
                match self.infer_base_owner(object, model, resolved) {
                    Some(owner) => RemapEdge {
                        source,
                        target_owner: owner,
                        target_name: object.name.clone(),
                        origin: RuleOrigin::Inferred,
                        policy: Some(policy),
                    },
                    None => {
                        log::warn!(
                            "remap inference inconclusive for {source}; keeping source schema"
                        );
                        summary.record_fallback(
                            Some(source.clone()),
                            ReasonCode::AmbiguousRemap,
                            "no resolvable base object for inference",
                        );
                        RemapEdge {
                            policy: Some(policy),
                            ..Self::default_edge(source)
                        }
                    }
                }
            }
            InferencePolicy::Dominant => {
                match Self::dominant_owner(object, resolved) {
                    Some(owner) => RemapEdge {
                        source,
                        target_owner: owner,
                        target_name: object.name.clone(),
                        origin: RuleOrigin::Inferred,
                        policy: Some(policy),
                    },
                    None => {
                        log::warn!(
                            "no dominant mapping for {source}; keeping source schema"
                        );
                        summary.record_fallback(
                            Some(source.clone()),
                            ReasonCode::AmbiguousRemap,
                            "reference set has no majority mapping",
                        );
                        RemapEdge {
                            policy: Some(policy),
                            ..Self::default_edge(source)
                        }
                    }
                }
            }
        }
    }

    /// The default policy: keep the source schema and name.
    fn default_edge(source: ObjectRef) -> RemapEdge {
        RemapEdge {
            target_owner: source.owner.clone(),
            target_name: source.name.clone(),
            source,
            origin: RuleOrigin::PolicyDefault,
            policy: None,
        }
    }

    /// Resolved owner of the object this one is bound to.
    fn infer_base_owner(
        &self,
        object: &SchemaObject,
        model: &ObjectModel,
        resolved: &RemapMap,
    ) -> Option<OwnerName> {
        let base = match object.object_type {
            ObjectType::Synonym => resolve_synonym_base(object, model)?,
            ObjectType::PackageBody => ObjectRef {
                owner: object.owner.clone(),
                name: object.name.clone(),
                object_type: ObjectType::Package,
            },
            ObjectType::TypeBody => ObjectRef {
                owner: object.owner.clone(),
                name: object.name.clone(),
                object_type: ObjectType::TypeSpec,
            },
            _ => bound_table_ref(object)?,
        };
        let edge = resolved.get(&base)?;
        Some(edge.target_owner.clone())
    }

    /// Majority resolved owner among the object's reference set; `None`
    /// on an empty set or a tie.
    fn dominant_owner(object: &SchemaObject, resolved: &RemapMap) -> Option<OwnerName> {
        let mut counts: BTreeMap<OwnerName, usize> = BTreeMap::new();
        for dep in &object.dependencies {
            let dep_ref = ObjectRef {
                owner: dep.owner.clone(),
                name: dep.name.clone(),
                object_type: dep.object_type.clone(),
            };
            let owner = resolved
                .get(&dep_ref)
                .map(|e| e.target_owner.clone())
                .unwrap_or(dep.owner.clone());
            *counts.entry(owner).or_insert(0) += 1;
        }
        let best = counts.values().copied().max()?;
        let mut winners = counts.iter().filter(|(_, &c)| c == best);
        let winner = winners.next()?.0.clone();
        if winners.next().is_some() {
            return None; // tied majority is inconclusive
        }
        Some(winner)
    }
}

/// The `OWNER.NAME` a trigger/sequence/index/constraint is bound to.
fn bound_table_ref(object: &SchemaObject) -> Option<ObjectRef> {
    let bound = object.attr_str(ATTR_BOUND_TABLE)?;
    let (owner, name) = bound.split_once('.')?;
    Some(ObjectRef {
        owner: OwnerName::try_new(owner)?,
        name: ObjectName::try_new(name)?,
        object_type: ObjectType::Table,
    })
}

/// Follow a synonym chain to its ultimate base object.
///
/// Looks in the synonym's own schema first, then PUBLIC. Chains through
/// further synonyms with a visited set, so synonym loops terminate.
pub fn resolve_synonym_base(synonym: &SchemaObject, model: &ObjectModel) -> Option<ObjectRef> {
    let mut visited: BTreeSet<(OwnerName, ObjectName)> = BTreeSet::new();
    let (mut owner, mut name) = synonym.synonym_target()?;

    loop {
        if !visited.insert((owner.clone(), name.clone())) {
            return None; // synonym loop
        }
        let next = model
            .get_by_name(Side::Source, &owner, &name)
            .or_else(|| model.get_by_name(Side::Source, "PUBLIC", &name));
        match next {
            Some(obj) if obj.object_type == ObjectType::Synonym => {
                let (o, n) = obj.synonym_target()?;
                owner = o;
                name = n;
            }
            Some(obj) => return Some(obj.object_ref()),
            None => return None,
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
