use super::*;
use sr_core::object::{
    RawDependency, ReferenceKind, ATTR_SYNONYM_TARGET_NAME, ATTR_SYNONYM_TARGET_OWNER,
};

fn rules(yaml: &str) -> RemapRuleSet {
    serde_yaml::from_str(yaml).unwrap()
}

fn model_with(objects: Vec<SchemaObject>) -> ObjectModel {
    let mut model = ObjectModel::new();
    for obj in objects {
        model.insert(Side::Source, obj).unwrap();
    }
    model
}

fn synonym(owner: &str, name: &str, target_owner: &str, target_name: &str) -> SchemaObject {
    let mut syn = SchemaObject::new(owner, name, ObjectType::Synonym);
    syn.attributes.insert(
        ATTR_SYNONYM_TARGET_OWNER.to_string(),
        serde_json::json!(target_owner),
    );
    syn.attributes.insert(
        ATTR_SYNONYM_TARGET_NAME.to_string(),
        serde_json::json!(target_name),
    );
    syn
}

fn trigger_on(owner: &str, name: &str, table: &str) -> SchemaObject {
    let mut trg = SchemaObject::new(owner, name, ObjectType::Trigger);
    trg.attributes
        .insert(ATTR_BOUND_TABLE.to_string(), serde_json::json!(table));
    trg
}

#[test]
fn test_explicit_rule_wins() {
    let rules = rules("explicit:\n  - source_owner: HR\n    target_owner: PEOPLE\n");
    let model = model_with(vec![SchemaObject::new("HR", "T1", ObjectType::Table)]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map.get(&ObjectRef::new("HR", "T1", ObjectType::Table)).unwrap();
    assert_eq!(edge.target_owner, "PEOPLE");
    assert_eq!(edge.target_name, "T1");
    assert_eq!(edge.origin, RuleOrigin::Explicit);
}

#[test]
fn test_default_policy_keeps_source_schema() {
    let rules = RemapRuleSet::default();
    let model = model_with(vec![SchemaObject::new("HR", "T1", ObjectType::Table)]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map.get(&ObjectRef::new("HR", "T1", ObjectType::Table)).unwrap();
    assert!(edge.is_identity());
    assert_eq!(edge.origin, RuleOrigin::PolicyDefault);
}

#[test]
fn test_trigger_infers_table_schema() {
    let rules = rules("explicit:\n  - source_owner: HR\n    object_type: TABLE\n    target_owner: PEOPLE\n");
    let model = model_with(vec![
        SchemaObject::new("HR", "T1", ObjectType::Table),
        trigger_on("HR", "TRG1", "HR.T1"),
    ]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map
        .get(&ObjectRef::new("HR", "TRG1", ObjectType::Trigger))
        .unwrap();
    assert_eq!(edge.target_owner, "PEOPLE");
    assert_eq!(edge.origin, RuleOrigin::Inferred);
    assert_eq!(edge.policy, Some(InferencePolicy::Infer));
}

#[test]
fn test_synonym_chain_resolves_to_base() {
    // S2 -> S1 -> T1; PUBLIC synonym in the middle.
    let rules = rules("explicit:\n  - source_owner: HR\n    object_type: TABLE\n    target_owner: PEOPLE\n");
    let model = model_with(vec![
        SchemaObject::new("HR", "T1", ObjectType::Table),
        synonym("PUBLIC", "S1", "HR", "T1"),
        synonym("APP", "S2", "PUBLIC", "S1"),
    ]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map.get(&ObjectRef::new("APP", "S2", ObjectType::Synonym)).unwrap();
    assert_eq!(edge.target_owner, "PEOPLE");
    assert_eq!(edge.origin, RuleOrigin::Inferred);
}

#[test]
fn test_synonym_loop_falls_back_to_default() {
    let rules = RemapRuleSet::default();
    let model = model_with(vec![
        synonym("HR", "S1", "HR", "S2"),
        synonym("HR", "S2", "HR", "S1"),
    ]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map.get(&ObjectRef::new("HR", "S1", ObjectType::Synonym)).unwrap();
    assert!(edge.is_identity());
    assert_eq!(edge.origin, RuleOrigin::PolicyDefault);
    assert!(summary
        .events
        .iter()
        .any(|e| e.reason == ReasonCode::AmbiguousRemap));
}

#[test]
fn test_public_synonym_stays_public() {
    // The base table relocates; a PUBLIC synonym pointing at it does not.
    let rules = rules("explicit:\n  - source_owner: HR\n    object_type: TABLE\n    target_owner: PEOPLE\n");
    let model = model_with(vec![
        SchemaObject::new("HR", "T1", ObjectType::Table),
        synonym("PUBLIC", "S1", "HR", "T1"),
    ]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map
        .get(&ObjectRef::new("PUBLIC", "S1", ObjectType::Synonym))
        .unwrap();
    assert_eq!(edge.target_owner, "PUBLIC");
    assert!(edge.is_identity());
}

#[test]
fn test_dominant_policy_majority() {
    let rules = rules(
        "explicit:\n  - source_owner: HR\n    object_type: TABLE\n    target_owner: PEOPLE\npolicies:\n  SYNONYM: dominant\n",
    );
    let mut syn = synonym("APP", "S1", "HR", "T1");
    syn.dependencies = vec![
        RawDependency {
            owner: OwnerName::new("HR"),
            name: ObjectName::new("T1"),
            object_type: ObjectType::Table,
            kind: ReferenceKind::HardReference,
        },
        RawDependency {
            owner: OwnerName::new("HR"),
            name: ObjectName::new("T2"),
            object_type: ObjectType::Table,
            kind: ReferenceKind::HardReference,
        },
        RawDependency {
            owner: OwnerName::new("OTHER"),
            name: ObjectName::new("T3"),
            object_type: ObjectType::Table,
            kind: ReferenceKind::HardReference,
        },
    ];
    let model = model_with(vec![
        SchemaObject::new("HR", "T1", ObjectType::Table),
        SchemaObject::new("HR", "T2", ObjectType::Table),
        SchemaObject::new("OTHER", "T3", ObjectType::Table),
        syn,
    ]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map.get(&ObjectRef::new("APP", "S1", ObjectType::Synonym)).unwrap();
    // Two of three references resolve to PEOPLE.
    assert_eq!(edge.target_owner, "PEOPLE");
}

#[test]
fn test_dominant_tie_is_ambiguous() {
    let rules = rules("policies:\n  SYNONYM: dominant\n");
    let mut syn = synonym("APP", "S1", "HR", "T1");
    syn.dependencies = vec![
        RawDependency {
            owner: OwnerName::new("A"),
            name: ObjectName::new("T1"),
            object_type: ObjectType::Table,
            kind: ReferenceKind::HardReference,
        },
        RawDependency {
            owner: OwnerName::new("B"),
            name: ObjectName::new("T2"),
            object_type: ObjectType::Table,
            kind: ReferenceKind::HardReference,
        },
    ];
    let model = model_with(vec![syn]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map.get(&ObjectRef::new("APP", "S1", ObjectType::Synonym)).unwrap();
    assert!(edge.is_identity());
    assert_eq!(summary.events.len(), 1);
}

#[test]
fn test_resolution_is_idempotent() {
    let rules = rules("explicit:\n  - source_owner: HR\n    target_owner: PEOPLE\n");
    let model = model_with(vec![
        SchemaObject::new("HR", "T1", ObjectType::Table),
        trigger_on("HR", "TRG1", "HR.T1"),
        synonym("PUBLIC", "S1", "HR", "T1"),
    ]);

    let mut s1 = RunSummary::new();
    let mut s2 = RunSummary::new();
    let first = RemapResolver::new(&rules).resolve_all(&model, &mut s1);
    let second = RemapResolver::new(&rules).resolve_all(&model, &mut s2);

    assert_eq!(first.len(), second.len());
    for (key, edge) in first.iter() {
        assert_eq!(second.get(key), Some(edge));
    }
}

#[test]
fn test_source_only_policy() {
    let rules = rules("explicit:\n  - source_owner: HR\n    object_type: TABLE\n    target_owner: PEOPLE\npolicies:\n  SEQUENCE: source_only\n");
    let mut seq = SchemaObject::new("HR", "SEQ1", ObjectType::Sequence);
    seq.attributes
        .insert(ATTR_BOUND_TABLE.to_string(), serde_json::json!("HR.T1"));
    let model = model_with(vec![SchemaObject::new("HR", "T1", ObjectType::Table), seq]);
    let mut summary = RunSummary::new();

    let map = RemapResolver::new(&rules).resolve_all(&model, &mut summary);
    let edge = map
        .get(&ObjectRef::new("HR", "SEQ1", ObjectType::Sequence))
        .unwrap();
    // Table moved to PEOPLE but the sequence stays put.
    assert_eq!(edge.target_owner, "HR");
    assert_eq!(edge.policy, Some(InferencePolicy::SourceOnly));
}
