use super::*;

#[test]
fn test_literal_pattern_exact_match() {
    let p = NamePattern::compile("EMPLOYEES");
    assert!(p.is_literal());
    assert!(p.matches("EMPLOYEES"));
    assert!(!p.matches("EMPLOYEES_HIST"));
    assert!(!p.matches("employees"));
}

#[test]
fn test_percent_wildcard() {
    let p = NamePattern::compile("EMP%");
    assert!(!p.is_literal());
    assert!(p.matches("EMP"));
    assert!(p.matches("EMPLOYEES"));
    assert!(!p.matches("TMP_EMP"));
}

#[test]
fn test_underscore_wildcard() {
    let p = NamePattern::compile("T_1");
    assert!(p.matches("TX1"));
    assert!(p.matches("T01"));
    assert!(!p.matches("T001"));
}

#[test]
fn test_regex_metacharacters_are_literal() {
    let p = NamePattern::compile("T$AUDIT");
    assert!(p.matches("T$AUDIT"));
    assert!(!p.matches("TXAUDIT"));

    let p = NamePattern::compile("A.B");
    assert!(p.matches("A.B"));
    assert!(!p.matches("AXB"));

    let p = NamePattern::compile("V(1)");
    assert!(p.matches("V(1)"));
}

#[test]
fn test_serde_round_trip() {
    let p: NamePattern = serde_json::from_str("\"EMP%\"").unwrap();
    assert!(p.matches("EMPLOYEES"));
    assert_eq!(serde_json::to_string(&p).unwrap(), "\"EMP%\"");
}
