use super::*;
use std::io::Write;

const RULES_YAML: &str = r#"
- id: no-nested-tables
  object_type: TABLE
  name: "NT_%"
  verdict: unsupported
  reason_code: DIALECT_SYNTAX
- id: long-columns-advisory
  column_type: "LONG%"
  verdict: advisory
  reason_code: DEPRECATED_TYPE
- id: gated-rule
  verdict: unsupported
  reason_code: DIALECT_SYNTAX
  min_version: "4.4.2"
- id: disabled-rule
  verdict: unsupported
  reason_code: BLACKLISTED
  enabled: false
- id: needs-priv
  requires_attribute: system_privileges
  verdict: unsupported
  reason_code: PRIVILEGE_GAP
"#;

fn rule_set() -> RuleSet {
    RuleSet::from_str_tolerant(RULES_YAML).unwrap()
}

#[test]
fn test_load_and_match() {
    let rules = rule_set();
    assert_eq!(rules.rules.len(), 5);

    let obj = SchemaObject::new("HR", "NT_ORDERS", ObjectType::Table);
    assert_eq!(rules.rules[0].evaluate(&obj), Ok(true));

    let other = SchemaObject::new("HR", "ORDERS", ObjectType::Table);
    assert_eq!(rules.rules[0].evaluate(&other), Ok(false));
}

#[test]
fn test_column_type_rule() {
    let rules = rule_set();
    let mut obj = SchemaObject::new("HR", "DOCS", ObjectType::Table);
    obj.columns.push(sr_core::object::ColumnMeta {
        name: "BODY".to_string(),
        data_type: "LONG RAW".to_string(),
        precision: None,
        scale: None,
        nullable: true,
        default_expr: None,
        position: 1,
    });
    assert_eq!(rules.rules[1].evaluate(&obj), Ok(true));
}

#[test]
fn test_scenario_d_version_gate_skips_rule() {
    let rules = rule_set();
    let mut summary = RunSummary::new();
    let active = rules.active(&"4.2.5".parse().unwrap(), &mut summary);

    let ids: Vec<&str> = active.iter().map(|r| r.id.as_str()).collect();
    assert!(!ids.contains(&"gated-rule"));
    assert!(!ids.contains(&"disabled-rule"));
    assert!(ids.contains(&"no-nested-tables"));
    // Both skips are recorded.
    assert_eq!(summary.events.len(), 2);
}

#[test]
fn test_version_gate_admits_when_high_enough() {
    let rules = rule_set();
    let mut summary = RunSummary::new();
    let active = rules.active(&"4.4.2".parse().unwrap(), &mut summary);
    assert!(active.iter().any(|r| r.id == "gated-rule"));
}

#[test]
fn test_missing_required_attribute_is_eval_error() {
    let rules = rule_set();
    let obj = SchemaObject::new("HR", "T", ObjectType::Table);
    assert_eq!(
        rules.rules[4].evaluate(&obj),
        Err(RuleEvalError::MissingAttribute {
            key: "system_privileges".to_string()
        })
    );

    let mut with_attr = SchemaObject::new("HR", "T2", ObjectType::Table);
    with_attr
        .attributes
        .insert("system_privileges".to_string(), serde_json::json!([]));
    assert_eq!(rules.rules[4].evaluate(&with_attr), Ok(true));
}

#[test]
fn test_malformed_rule_skipped_not_fatal() {
    let yaml = r#"
- id: good
  verdict: unsupported
  reason_code: BLACKLISTED
- id: bad
  verdict: not_a_verdict
  reason_code: BLACKLISTED
"#;
    let rules = RuleSet::from_str_tolerant(yaml).unwrap();
    assert_eq!(rules.rules.len(), 1);
    assert_eq!(rules.rules[0].id, "good");
}

#[test]
fn test_unknown_reason_code_preserved() {
    let yaml = "- id: future\n  verdict: unsupported\n  reason_code: SOME_NEW_CODE\n";
    let rules = RuleSet::from_str_tolerant(yaml).unwrap();
    assert_eq!(
        rules.rules[0].reason_code,
        ReasonCode::Unknown("SOME_NEW_CODE".to_string())
    );
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RULES_YAML.as_bytes()).unwrap();
    let rules = RuleSet::from_file(file.path()).unwrap();
    assert_eq!(rules.rules.len(), 5);
}

#[test]
fn test_missing_file() {
    let err = RuleSet::from_file(Path::new("/no/such/rules.yml")).unwrap_err();
    assert!(matches!(err, ClassifyError::RuleFileNotFound { .. }));
}
