use super::*;
use crate::resolver::{RemapResolver, RemapMap};
use crate::rules::RemapRuleSet;
use sr_core::object::{RawDependency, SchemaObject, ATTR_SYNONYM_TARGET_NAME, ATTR_SYNONYM_TARGET_OWNER};
use sr_core::summary::RunSummary;

fn resolve(model: &ObjectModel, yaml: &str) -> RemapMap {
    let rules: RemapRuleSet = serde_yaml::from_str(yaml).unwrap();
    let mut summary = RunSummary::new();
    RemapResolver::new(&rules).resolve_all(model, &mut summary)
}

#[test]
fn test_edges_re_expressed_in_remapped_coordinates() {
    let mut model = ObjectModel::new();
    model
        .insert(Side::Source, SchemaObject::new("HR", "T1", ObjectType::Table))
        .unwrap();
    let mut view = SchemaObject::new("HR", "V1", ObjectType::View);
    view.dependencies.push(RawDependency {
        owner: OwnerName::new("HR"),
        name: ObjectName::new("T1"),
        object_type: ObjectType::Table,
        kind: ReferenceKind::HardReference,
    });
    model.insert(Side::Source, view).unwrap();

    let remap = resolve(&model, "explicit:\n  - source_owner: HR\n    target_owner: PEOPLE\n");
    let graph = build_dependency_graph(&model, &remap);

    let t1 = ObjectRef::new("PEOPLE", "T1", ObjectType::Table);
    let v1 = ObjectRef::new("PEOPLE", "V1", ObjectType::View);
    assert!(graph.contains(&t1));
    assert_eq!(graph.dependencies_of(&v1), vec![t1]);
}

#[test]
fn test_builtin_references_excluded() {
    let mut model = ObjectModel::new();
    let mut view = SchemaObject::new("HR", "V1", ObjectType::View);
    view.dependencies.push(RawDependency {
        owner: OwnerName::new("SYS"),
        name: ObjectName::new("DUAL"),
        object_type: ObjectType::Table,
        kind: ReferenceKind::HardReference,
    });
    model.insert(Side::Source, view).unwrap();

    let remap = resolve(&model, "");
    let graph = build_dependency_graph(&model, &remap);

    let v1 = ObjectRef::new("HR", "V1", ObjectType::View);
    assert!(graph.dependencies_of(&v1).is_empty());
    assert!(!graph.contains(&ObjectRef::new("SYS", "DUAL", ObjectType::Table)));
}

#[test]
fn test_implicit_binding_edges() {
    let mut model = ObjectModel::new();
    model
        .insert(Side::Source, SchemaObject::new("HR", "T1", ObjectType::Table))
        .unwrap();

    let mut trg = SchemaObject::new("HR", "TRG1", ObjectType::Trigger);
    trg.attributes
        .insert(ATTR_BOUND_TABLE.to_string(), serde_json::json!("HR.T1"));
    model.insert(Side::Source, trg).unwrap();

    let mut seq = SchemaObject::new("HR", "SEQ1", ObjectType::Sequence);
    seq.attributes
        .insert(ATTR_BOUND_TABLE.to_string(), serde_json::json!("HR.T1"));
    model.insert(Side::Source, seq).unwrap();

    let remap = resolve(&model, "");
    let graph = build_dependency_graph(&model, &remap);

    let t1 = ObjectRef::new("HR", "T1", ObjectType::Table);
    let trg1 = ObjectRef::new("HR", "TRG1", ObjectType::Trigger);
    let seq1 = ObjectRef::new("HR", "SEQ1", ObjectType::Sequence);

    assert_eq!(graph.reference_kind(&trg1, &t1), Some(ReferenceKind::TriggerOnTable));
    assert_eq!(graph.reference_kind(&t1, &seq1), Some(ReferenceKind::SequenceOwner));

    // Layering puts the sequence before the table, the table before the trigger.
    let layers = graph.topo_layers();
    let pos = |r: &ObjectRef| layers.iter().position(|l| l.contains(r)).unwrap();
    assert!(pos(&seq1) < pos(&t1));
    assert!(pos(&t1) < pos(&trg1));
}

#[test]
fn test_synonym_edge_to_base() {
    let mut model = ObjectModel::new();
    model
        .insert(Side::Source, SchemaObject::new("HR", "T1", ObjectType::Table))
        .unwrap();
    let mut syn = SchemaObject::new("PUBLIC", "S1", ObjectType::Synonym);
    syn.attributes
        .insert(ATTR_SYNONYM_TARGET_OWNER.to_string(), serde_json::json!("HR"));
    syn.attributes
        .insert(ATTR_SYNONYM_TARGET_NAME.to_string(), serde_json::json!("T1"));
    model.insert(Side::Source, syn).unwrap();

    let remap = resolve(&model, "");
    let graph = build_dependency_graph(&model, &remap);

    let s1 = ObjectRef::new("PUBLIC", "S1", ObjectType::Synonym);
    let t1 = ObjectRef::new("HR", "T1", ObjectType::Table);
    assert_eq!(graph.reference_kind(&s1, &t1), Some(ReferenceKind::SynonymTarget));
}

#[test]
fn test_package_body_depends_on_spec() {
    let mut model = ObjectModel::new();
    model
        .insert(Side::Source, SchemaObject::new("HR", "PKG", ObjectType::Package))
        .unwrap();
    model
        .insert(Side::Source, SchemaObject::new("HR", "PKG", ObjectType::PackageBody))
        .unwrap();

    let remap = resolve(&model, "");
    let graph = build_dependency_graph(&model, &remap);

    let body = ObjectRef::new("HR", "PKG", ObjectType::PackageBody);
    let spec = ObjectRef::new("HR", "PKG", ObjectType::Package);
    assert_eq!(graph.reference_kind(&body, &spec), Some(ReferenceKind::BodyOfSpec));
}
