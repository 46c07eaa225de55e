use super::*;
use sr_core::model::ObjectModel;
use sr_core::object::{ObjectType, SchemaObject, Side};
use sr_core::summary::RunSummary;
use sr_remap::rules::RemapRuleSet;
use sr_remap::RemapResolver;

fn remap_for(rules_yaml: &str, objects: Vec<SchemaObject>) -> RemapMap {
    let rules: RemapRuleSet = serde_yaml::from_str(rules_yaml).unwrap();
    let mut model = ObjectModel::new();
    for object in objects {
        model.insert(Side::Source, object).unwrap();
    }
    let mut summary = RunSummary::new();
    RemapResolver::new(&rules).resolve_all(&model, &mut summary)
}

fn move_schema_a() -> RemapMap {
    remap_for(
        r#"
explicit:
  - source_owner: SCHEMA_A
    target_owner: SCHEMA_B
"#,
        vec![SchemaObject::new("SCHEMA_A", "T", ObjectType::Table)],
    )
}

#[test]
fn test_qualified_reference_rewritten() {
    let rewriter = DdlRewriter::from_remap(&move_schema_a());
    assert_eq!(
        rewriter.rewrite("CREATE VIEW V AS SELECT * FROM SCHEMA_A.T"),
        "CREATE VIEW V AS SELECT * FROM SCHEMA_B.T"
    );
}

#[test]
fn test_scenario_e_alias_untouched() {
    // SCHEMA_X.ALIAS is a real remapped (and renamed) object, but the
    // ALIAS token after SCHEMA_A.T is an alias, not a reference.
    let remap = remap_for(
        r#"
explicit:
  - source_owner: SCHEMA_A
    target_owner: SCHEMA_B
  - source_owner: SCHEMA_X
    source_name: ALIAS
    target_owner: SCHEMA_Y
    target_name: ALIAS_RENAMED
"#,
        vec![
            SchemaObject::new("SCHEMA_A", "T", ObjectType::Table),
            SchemaObject::new("SCHEMA_X", "ALIAS", ObjectType::Table),
        ],
    );
    let rewriter = DdlRewriter::from_remap(&remap);

    assert_eq!(
        rewriter.rewrite("SELECT ALIAS.ID FROM SCHEMA_A.T ALIAS"),
        "SELECT ALIAS.ID FROM SCHEMA_B.T ALIAS"
    );
    // The qualified form of the renamed object still rewrites fully.
    assert_eq!(
        rewriter.rewrite("SELECT * FROM SCHEMA_X.ALIAS"),
        "SELECT * FROM SCHEMA_Y.ALIAS_RENAMED"
    );
}

#[test]
fn test_literals_and_comments_protected() {
    let rewriter = DdlRewriter::from_remap(&move_schema_a());
    let sql = "SELECT 'SCHEMA_A.T' FROM SCHEMA_A.T -- SCHEMA_A.T stays\n";
    assert_eq!(
        rewriter.rewrite(sql),
        "SELECT 'SCHEMA_A.T' FROM SCHEMA_B.T -- SCHEMA_A.T stays\n"
    );
}

#[test]
fn test_quoted_idents_and_binds_protected() {
    let rewriter = DdlRewriter::from_remap(&move_schema_a());
    let sql = r#"SELECT "SCHEMA_A", :T FROM SCHEMA_A.T"#;
    assert_eq!(
        rewriter.rewrite(sql),
        r#"SELECT "SCHEMA_A", :T FROM SCHEMA_B.T"#
    );
}

#[test]
fn test_bare_rename_applies_outside_alias_position() {
    let remap = remap_for(
        r#"
explicit:
  - source_owner: HR
    source_name: OLD_NAME
    target_owner: HR
    target_name: NEW_NAME
"#,
        vec![SchemaObject::new("HR", "OLD_NAME", ObjectType::Table)],
    );
    let rewriter = DdlRewriter::from_remap(&remap);
    assert_eq!(
        rewriter.rewrite("SELECT * FROM OLD_NAME"),
        "SELECT * FROM NEW_NAME"
    );
    // Member of a dotted reference stays: it belongs to OTHER's schema.
    assert_eq!(
        rewriter.rewrite("SELECT * FROM OTHER.OLD_NAME"),
        "SELECT * FROM OTHER.OLD_NAME"
    );
}

#[test]
fn test_conflicting_renames_disable_bare_substitution() {
    let remap = remap_for(
        r#"
explicit:
  - source_owner: A
    source_name: T
    target_owner: A
    target_name: T_ONE
  - source_owner: B
    source_name: T
    target_owner: B
    target_name: T_TWO
"#,
        vec![
            SchemaObject::new("A", "T", ObjectType::Table),
            SchemaObject::new("B", "T", ObjectType::Table),
        ],
    );
    let rewriter = DdlRewriter::from_remap(&remap);
    // Ambiguous bare name stays; qualified forms still rewrite.
    assert_eq!(rewriter.rewrite("SELECT * FROM T"), "SELECT * FROM T");
    assert_eq!(rewriter.rewrite("SELECT * FROM A.T"), "SELECT * FROM A.T_ONE");
}

#[test]
fn test_identity_remap_leaves_text_alone() {
    let remap = remap_for("explicit: []", vec![SchemaObject::new("HR", "T", ObjectType::Table)]);
    let rewriter = DdlRewriter::from_remap(&remap);
    let sql = "CREATE VIEW V AS SELECT * FROM HR.T";
    assert_eq!(rewriter.rewrite(sql), sql);
}

#[test]
fn test_case_insensitive_match_on_unquoted_words() {
    let rewriter = DdlRewriter::from_remap(&move_schema_a());
    assert_eq!(
        rewriter.rewrite("select * from schema_a.t"),
        "select * from SCHEMA_B.T"
    );
}
