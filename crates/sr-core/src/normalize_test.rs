use super::*;

fn col(data_type: &str, precision: Option<u32>, scale: Option<i32>) -> ColumnMeta {
    ColumnMeta {
        name: "C".to_string(),
        data_type: data_type.to_string(),
        precision,
        scale,
        nullable: true,
        default_expr: None,
        position: 1,
    }
}

#[test]
fn test_unspecified_number_equals_max_precision() {
    // Scenario A: NUMBER (no precision, scale 0) vs NUMBER(38,0)
    let source = col("NUMBER", None, Some(0));
    let target = col("NUMBER", Some(38), Some(0));
    assert_eq!(
        compare_column_types(&source, &target),
        TypeComparison::NormalizedMatch(SuppressionTag::NumericEquivalence)
    );
}

#[test]
fn test_integer_alias_equals_number_38_0() {
    let source = col("INTEGER", None, None);
    let target = col("NUMBER", Some(38), Some(0));
    assert_eq!(
        compare_column_types(&source, &target),
        TypeComparison::NormalizedMatch(SuppressionTag::TypeAlias)
    );
}

#[test]
fn test_varchar2_aliases_varchar() {
    let source = col("VARCHAR2", Some(100), None);
    let target = col("VARCHAR", Some(100), None);
    assert_eq!(
        compare_column_types(&source, &target),
        TypeComparison::NormalizedMatch(SuppressionTag::TypeAlias)
    );
}

#[test]
fn test_exact_match() {
    let a = col("DATE", None, None);
    let b = col("DATE", None, None);
    assert_eq!(compare_column_types(&a, &b), TypeComparison::ExactMatch);
}

#[test]
fn test_genuine_mismatch() {
    let source = col("NUMBER", Some(10), Some(2));
    let target = col("NUMBER", Some(38), Some(0));
    assert_eq!(compare_column_types(&source, &target), TypeComparison::Mismatch);

    let source = col("VARCHAR2", Some(50), None);
    let target = col("VARCHAR", Some(100), None);
    assert_eq!(compare_column_types(&source, &target), TypeComparison::Mismatch);
}

#[test]
fn test_legacy_lob_detection() {
    assert!(is_legacy_lob("LONG"));
    assert!(is_legacy_lob("long raw"));
    assert!(!is_legacy_lob("CLOB"));
    assert!(!is_legacy_lob("NUMBER"));
}

#[test]
fn test_expr_whitespace_and_case_insensitive() {
    assert!(exprs_equivalent("salary > 0", "SALARY   >   0"));
    assert!(exprs_equivalent("a+b", "A + B"));
    // Spacing around operators is noise; spacing between words is not.
    assert!(!exprs_equivalent("a b", "ab"));
}

#[test]
fn test_expr_literal_case_preserved() {
    // Literal content is masked from case folding, so these differ.
    assert!(!exprs_equivalent("status = 'Active'", "status = 'ACTIVE'"));
    assert!(exprs_equivalent("status = 'Active'", "STATUS = 'Active'"));
}

#[test]
fn test_expr_redundant_parens_stripped() {
    assert!(exprs_equivalent("(salary > 0)", "salary > 0"));
    assert!(exprs_equivalent("((a = 1))", "a = 1"));
    // Parens that do not wrap the whole expression are significant.
    assert!(!exprs_equivalent("(a or b) and c", "a or b and c"));
}

#[test]
fn test_expr_comments_ignored() {
    assert!(exprs_equivalent("a > 1 -- check\n", "a > 1"));
    assert!(exprs_equivalent("a /* x */ > 1", "a > 1"));
}

#[test]
fn test_normalize_type_passthrough() {
    let t = normalize_type("TIMESTAMP", Some(6), None);
    assert_eq!(t.canonical, "TIMESTAMP");
    assert_eq!(t.precision, Some(6));
}
