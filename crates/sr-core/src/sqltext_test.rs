use super::*;

fn kinds(sql: &str) -> Vec<(TokenKind, String)> {
    tokenize(sql)
        .into_iter()
        .map(|t| (t.kind, t.text.to_string()))
        .collect()
}

fn reassemble(sql: &str) -> String {
    tokenize(sql).into_iter().map(|t| t.text.to_string()).collect()
}

#[test]
fn test_round_trip_is_lossless() {
    let sql = "SELECT 'a''b', \"Col\" FROM hr.t -- trailing\n/* block */ WHERE x = :bind";
    assert_eq!(reassemble(sql), sql);
}

#[test]
fn test_literal_with_escaped_quote() {
    let toks = kinds("SELECT 'it''s' FROM dual");
    assert!(toks.contains(&(TokenKind::Literal, "'it''s'".to_string())));
}

#[test]
fn test_line_and_block_comments() {
    let toks = kinds("a -- line\nb /* block */ c");
    assert!(toks.contains(&(TokenKind::Comment, "-- line\n".to_string())));
    assert!(toks.contains(&(TokenKind::Comment, "/* block */".to_string())));
}

#[test]
fn test_quoted_identifier() {
    let toks = kinds("SELECT \"MixedCase\" FROM t");
    assert!(toks.contains(&(TokenKind::QuotedIdent, "\"MixedCase\"".to_string())));
}

#[test]
fn test_bind_variable_is_not_a_word() {
    let toks = kinds("WHERE id = :emp_id");
    assert!(toks.contains(&(TokenKind::BindVariable, ":emp_id".to_string())));
    assert!(!toks.contains(&(TokenKind::Word, "emp_id".to_string())));
}

#[test]
fn test_unterminated_literal_extends_to_end() {
    let toks = kinds("SELECT 'oops");
    assert_eq!(toks.last().unwrap(), &(TokenKind::Literal, "'oops".to_string()));
    assert_eq!(reassemble("SELECT 'oops"), "SELECT 'oops");
}

#[test]
fn test_unterminated_block_comment_extends_to_end() {
    let toks = kinds("a /* never closed");
    assert_eq!(
        toks.last().unwrap(),
        &(TokenKind::Comment, "/* never closed".to_string())
    );
}

#[test]
fn test_dollar_and_hash_in_words() {
    let toks = kinds("SELECT col$x, col#y FROM t");
    assert!(toks.contains(&(TokenKind::Word, "col$x".to_string())));
    assert!(toks.contains(&(TokenKind::Word, "col#y".to_string())));
}
