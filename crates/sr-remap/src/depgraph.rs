//! Dependency graph construction over remapped coordinates.

use crate::resolver::RemapMap;
use sr_core::graph::{is_builtin_ref, DependencyGraph};
use sr_core::ident::{ObjectName, OwnerName};
use sr_core::model::ObjectModel;
use sr_core::object::{ObjectRef, ObjectType, ReferenceKind, Side, ATTR_BOUND_TABLE};

/// Build the dependency graph for target-side planning.
///
/// Every source object becomes a node at its remapped identity; catalog
/// dependency edges and the implicit binding edges (trigger on table,
/// sequence driving a table, synonym to base, body to spec) are re-expressed
/// in remapped coordinates. References to built-in/system objects are
/// dropped: they need no target mapping and must not show up as missing
/// dependencies.
pub fn build_dependency_graph(model: &ObjectModel, remap: &RemapMap) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for object in model.objects(Side::Source) {
        let node = remap.target_of(&object.object_ref());
        graph.add_object(&node);

        for dep in &object.dependencies {
            if is_builtin_ref(&dep.owner, &dep.name) {
                continue;
            }
            let dep_ref = ObjectRef {
                owner: dep.owner.clone(),
                name: dep.name.clone(),
                object_type: dep.object_type.clone(),
            };
            graph.add_reference(&node, &remap.target_of(&dep_ref), dep.kind);
        }

        match object.object_type {
            ObjectType::Trigger => {
                if let Some(table) = bound_table(object) {
                    graph.add_reference(&node, &remap.target_of(&table), ReferenceKind::TriggerOnTable);
                }
            }
            ObjectType::Sequence => {
                // The bound table depends on its sequence, not the reverse.
                if let Some(table) = bound_table(object) {
                    graph.add_reference(&remap.target_of(&table), &node, ReferenceKind::SequenceOwner);
                }
            }
            ObjectType::Synonym => {
                if let Some((owner, name)) = object.synonym_target() {
                    if !is_builtin_ref(&owner, &name) {
                        if let Some(base) = model.get_by_name(Side::Source, &owner, &name) {
                            let base_ref = base.object_ref();
                            graph.add_reference(
                                &node,
                                &remap.target_of(&base_ref),
                                ReferenceKind::SynonymTarget,
                            );
                        }
                    }
                }
            }
            ObjectType::PackageBody => {
                let spec = ObjectRef {
                    owner: object.owner.clone(),
                    name: object.name.clone(),
                    object_type: ObjectType::Package,
                };
                if model.get(Side::Source, &spec).is_some() {
                    graph.add_reference(&node, &remap.target_of(&spec), ReferenceKind::BodyOfSpec);
                }
            }
            ObjectType::TypeBody => {
                let spec = ObjectRef {
                    owner: object.owner.clone(),
                    name: object.name.clone(),
                    object_type: ObjectType::TypeSpec,
                };
                if model.get(Side::Source, &spec).is_some() {
                    graph.add_reference(&node, &remap.target_of(&spec), ReferenceKind::BodyOfSpec);
                }
            }
            _ => {}
        }
    }

    graph
}

fn bound_table(object: &sr_core::object::SchemaObject) -> Option<ObjectRef> {
    let bound = object.attr_str(ATTR_BOUND_TABLE)?;
    let (owner, name) = bound.split_once('.')?;
    Some(ObjectRef {
        owner: OwnerName::try_new(owner)?,
        name: ObjectName::try_new(name)?,
        object_type: ObjectType::Table,
    })
}

#[cfg(test)]
#[path = "depgraph_test.rs"]
mod tests;
