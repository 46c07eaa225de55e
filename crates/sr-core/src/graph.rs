//! Dependency graph over remapped object coordinates.
//!
//! Unlike a build DAG, a schema dependency graph is allowed to contain
//! cycles (mutually referencing packages are legal in dialect A), so
//! cycles are a first-class reported condition here, never an error.
//! Layering runs over the strongly-connected-component condensation: a
//! cyclic group is placed as a single unit in the layer after its last
//! prerequisite, with a warning.

use crate::object::{ObjectRef, ReferenceKind};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Owners whose objects belong to the platform, not the migration.
const SYSTEM_OWNERS: &[&str] = &["SYS", "SYSTEM"];

/// Built-in relations that exist on every installation of either dialect.
const BUILTIN_RELATIONS: &[&str] = &["DUAL"];

/// Whether a reference targets a built-in/system object that needs no
/// target mapping and must not be reported as a missing dependency.
pub fn is_builtin_ref(owner: &str, name: &str) -> bool {
    SYSTEM_OWNERS.contains(&owner) || BUILTIN_RELATIONS.contains(&name)
}

/// A directed graph of object references.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<ObjectRef, ReferenceKind>,
    node_map: HashMap<ObjectRef, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object as a node, returning its index (idempotent).
    pub fn add_object(&mut self, object: &ObjectRef) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(object) {
            return idx;
        }
        let idx = self.graph.add_node(object.clone());
        self.node_map.insert(object.clone(), idx);
        idx
    }

    /// Record that `from` depends on `to`.
    ///
    /// Edges are stored dependency -> dependent so that layering yields
    /// prerequisites first.
    pub fn add_reference(&mut self, from: &ObjectRef, to: &ObjectRef, kind: ReferenceKind) {
        let from_idx = self.add_object(from);
        let to_idx = self.add_object(to);
        self.graph.add_edge(to_idx, from_idx, kind);
    }

    pub fn contains(&self, object: &ObjectRef) -> bool {
        self.node_map.contains_key(object)
    }

    /// All objects in the graph, in canonical order.
    pub fn objects(&self) -> Vec<ObjectRef> {
        let mut refs: Vec<ObjectRef> = self.node_map.keys().cloned().collect();
        refs.sort();
        refs
    }

    /// Direct dependencies of an object, in canonical order.
    pub fn dependencies_of(&self, object: &ObjectRef) -> Vec<ObjectRef> {
        self.neighbors(object, petgraph::Direction::Incoming)
    }

    /// Direct dependents of an object, in canonical order.
    pub fn dependents_of(&self, object: &ObjectRef) -> Vec<ObjectRef> {
        self.neighbors(object, petgraph::Direction::Outgoing)
    }

    /// The reference kind between `from` (dependent) and `to` (dependency),
    /// if such an edge exists.
    pub fn reference_kind(&self, from: &ObjectRef, to: &ObjectRef) -> Option<ReferenceKind> {
        let from_idx = *self.node_map.get(from)?;
        let to_idx = *self.node_map.get(to)?;
        self.graph
            .find_edge(to_idx, from_idx)
            .map(|e| self.graph[e])
    }

    fn neighbors(&self, object: &ObjectRef, direction: petgraph::Direction) -> Vec<ObjectRef> {
        let Some(&idx) = self.node_map.get(object) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut refs: Vec<ObjectRef> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| match direction {
                petgraph::Direction::Incoming => e.source(),
                petgraph::Direction::Outgoing => e.target(),
            })
            .filter(|n| seen.insert(*n))
            .map(|n| self.graph[n].clone())
            .collect();
        refs.sort();
        refs
    }

    /// Strongly connected groups of size > 1, plus self-loops, in
    /// canonical order. These are the cycle groups reported to the caller.
    pub fn cycle_groups(&self) -> Vec<Vec<ObjectRef>> {
        let mut groups: Vec<Vec<ObjectRef>> = Vec::new();
        for scc in tarjan_scc(&self.graph) {
            let cyclic = scc.len() > 1
                || scc
                    .first()
                    .is_some_and(|&n| self.graph.find_edge(n, n).is_some());
            if cyclic {
                let mut group: Vec<ObjectRef> =
                    scc.iter().map(|&n| self.graph[n].clone()).collect();
                group.sort();
                groups.push(group);
            }
        }
        groups.sort();
        groups
    }

    /// Kahn-style layering over the SCC condensation.
    ///
    /// Every node appears in exactly one layer; members of a cyclic group
    /// land in the same layer. Terminates for arbitrary input shapes,
    /// including self-loops.
    pub fn topo_layers(&self) -> Vec<Vec<ObjectRef>> {
        let sccs = tarjan_scc(&self.graph);
        let mut comp_of = vec![usize::MAX; self.graph.node_count()];
        for (comp, scc) in sccs.iter().enumerate() {
            if scc.len() > 1 {
                let members: Vec<String> =
                    scc.iter().map(|&n| self.graph[n].to_string()).collect();
                log::warn!(
                    "dependency cycle detected, layering as one unit: {}",
                    members.join(" <-> ")
                );
            }
            for &node in scc {
                comp_of[node.index()] = comp;
            }
        }

        // Condensed adjacency (dependency component -> dependent component).
        let mut succs: Vec<HashSet<usize>> = vec![HashSet::new(); sccs.len()];
        let mut preds: Vec<HashSet<usize>> = vec![HashSet::new(); sccs.len()];
        for edge in self.graph.edge_references() {
            let a = comp_of[edge.source().index()];
            let b = comp_of[edge.target().index()];
            if a != b {
                succs[a].insert(b);
                preds[b].insert(a);
            }
        }

        let mut remaining: Vec<usize> = preds.iter().map(HashSet::len).collect();
        let mut layer_of = vec![0usize; sccs.len()];
        let mut ready: Vec<usize> = (0..sccs.len()).filter(|&c| remaining[c] == 0).collect();
        let mut max_layer = 0usize;

        while let Some(comp) = ready.pop() {
            max_layer = max_layer.max(layer_of[comp]);
            for &next in &succs[comp] {
                layer_of[next] = layer_of[next].max(layer_of[comp] + 1);
                remaining[next] -= 1;
                if remaining[next] == 0 {
                    ready.push(next);
                }
            }
        }

        let mut layers: Vec<Vec<ObjectRef>> = vec![Vec::new(); max_layer + 1];
        for (comp, scc) in sccs.iter().enumerate() {
            for &node in scc {
                layers[layer_of[comp]].push(self.graph[node].clone());
            }
        }
        for layer in &mut layers {
            layer.sort();
        }
        layers.retain(|l| !l.is_empty());
        layers
    }

    /// The topological layer index of an object, if present.
    pub fn layer_of(&self, object: &ObjectRef) -> Option<usize> {
        self.topo_layers()
            .iter()
            .position(|layer| layer.contains(object))
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
