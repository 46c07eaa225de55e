use super::*;

#[test]
fn test_parse_known_code() {
    assert_eq!(ReasonCode::parse("DIALECT_SYNTAX"), ReasonCode::DialectSyntax);
    assert_eq!(ReasonCode::parse("NOT_IN_TARGET"), ReasonCode::NotInTarget);
}

#[test]
fn test_parse_unknown_code_preserved() {
    let code = ReasonCode::parse("SOME_FUTURE_CODE");
    assert_eq!(code, ReasonCode::Unknown("SOME_FUTURE_CODE".to_string()));
    assert_eq!(code.as_str(), "SOME_FUTURE_CODE");
}

#[test]
fn test_round_trip_all_known() {
    for code in [
        "COMPATIBLE",
        "NOT_IN_TARGET",
        "DIALECT_SYNTAX",
        "UNSUPPORTED_TYPE",
        "DEPRECATED_TYPE",
        "BLOCKED_BY_DEPENDENCY",
        "BLOCKED_BY_CYCLE",
        "BLACKLISTED",
        "METADATA_GAP",
        "PRIVILEGE_GAP",
        "DDL_UNAVAILABLE",
        "EXISTENCE_ONLY",
        "AMBIGUOUS_REMAP",
        "RULE_SKIPPED",
        "MANUAL_FIXUP",
    ] {
        let parsed = ReasonCode::parse(code);
        assert!(!matches!(parsed, ReasonCode::Unknown(_)), "{code} should be known");
        assert_eq!(parsed.as_str(), code);
    }
}

#[test]
fn test_display_matches_wire_form() {
    assert_eq!(ReasonCode::Blacklisted.to_string(), "BLACKLISTED");
}
