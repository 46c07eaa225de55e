//! Type-system and expression normalization.
//!
//! Dialect A and dialect B spell the same semantics differently; these
//! rules canonicalize both sides before the diff declares a mismatch, so
//! purely representational differences never surface as drift.
//!
//! Rule precedence is deterministic: (1) type-alias canonicalization,
//! (2) numeric precision/scale equivalence, (3) masked textual
//! normalization for expressions. A column matched by several rules is
//! canonicalized by the first applicable; later rules see the canonical
//! form.

use crate::object::ColumnMeta;
use crate::reason::SuppressionTag;
use crate::sqltext::{tokenize, TokenKind};

/// Maximum decimal precision of the fixed-point numeric type on both
/// dialects; an unspecified-precision integer is equivalent to this.
pub const MAX_NUMERIC_PRECISION: u32 = 38;

/// A data type reduced to its canonical dialect-agnostic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedType {
    pub canonical: String,
    pub precision: Option<u32>,
    pub scale: Option<i32>,
}

/// Canonical name for a dialect type name, folding known aliases.
fn canonical_type_name(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "VARCHAR2" | "NVARCHAR2" | "VARCHAR" => "VARCHAR".to_string(),
        "CHAR" | "NCHAR" | "CHARACTER" => "CHAR".to_string(),
        "NUMBER" | "NUMERIC" | "DECIMAL" | "DEC" => "NUMBER".to_string(),
        "INTEGER" | "INT" | "SMALLINT" | "BINARY_INTEGER" | "PLS_INTEGER" => "INTEGER".to_string(),
        "FLOAT" | "BINARY_FLOAT" | "BINARY_DOUBLE" | "DOUBLE PRECISION" | "REAL" => {
            "FLOAT".to_string()
        }
        "CLOB" | "NCLOB" | "TEXT" => "CLOB".to_string(),
        "BLOB" | "BYTEA" => "BLOB".to_string(),
        "DATE" => "DATE".to_string(),
        "TIMESTAMP" => "TIMESTAMP".to_string(),
        "RAW" => "RAW".to_string(),
        other => other.to_string(),
    }
}

/// Whether a source type is a legacy large-object type slated for
/// conversion (a non-blocking concern: dependents are not blocked by it).
pub fn is_legacy_lob(raw: &str) -> bool {
    matches!(raw.trim().to_uppercase().as_str(), "LONG" | "LONG RAW" | "LONG_RAW")
}

/// Normalize a column's declared type.
///
/// Alias folding runs first; an `INTEGER`-class type then acquires the
/// fixed maximum precision and scale 0, and an unspecified-precision
/// `NUMBER` with zero/absent scale does the same, so both compare equal
/// to an explicit `NUMBER(38,0)` on the other side.
pub fn normalize_type(raw: &str, precision: Option<u32>, scale: Option<i32>) -> NormalizedType {
    let canonical = canonical_type_name(raw);

    if canonical == "INTEGER" {
        return NormalizedType {
            canonical: "NUMBER".to_string(),
            precision: Some(MAX_NUMERIC_PRECISION),
            scale: Some(0),
        };
    }

    if canonical == "NUMBER" && precision.is_none() && scale.unwrap_or(0) == 0 {
        return NormalizedType {
            canonical,
            precision: Some(MAX_NUMERIC_PRECISION),
            scale: Some(0),
        };
    }

    NormalizedType {
        canonical,
        precision,
        scale,
    }
}

/// Compare two columns' types after normalization.
///
/// Returns `None` when the raw declarations already match, a suppression
/// tag when only normalization makes them equal, and
/// `Some(Err(()))`-like `false` handling is left to the caller via
/// [`TypeComparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeComparison {
    /// Raw declarations are identical
    ExactMatch,
    /// Equal only after normalization; the tag says which rule fired
    NormalizedMatch(SuppressionTag),
    /// Semantically different types
    Mismatch,
}

/// Classify the relationship between a source and a target column type.
pub fn compare_column_types(source: &ColumnMeta, target: &ColumnMeta) -> TypeComparison {
    let raw_equal = source.data_type.eq_ignore_ascii_case(&target.data_type)
        && source.precision == target.precision
        && source.scale == target.scale;
    if raw_equal {
        return TypeComparison::ExactMatch;
    }

    let s = normalize_type(&source.data_type, source.precision, source.scale);
    let t = normalize_type(&target.data_type, target.precision, target.scale);

    if s == t {
        // Same raw name means only precision/scale filling made the two
        // sides equal; a different raw name means the alias table did.
        let tag = if source
            .data_type
            .trim()
            .eq_ignore_ascii_case(target.data_type.trim())
        {
            SuppressionTag::NumericEquivalence
        } else {
            SuppressionTag::TypeAlias
        };
        return TypeComparison::NormalizedMatch(tag);
    }

    TypeComparison::Mismatch
}

/// Normalize an expression for comparison: comments dropped, keywords and
/// identifiers case-folded, literal and quoted content preserved verbatim,
/// redundant enclosing parentheses stripped. Whitespace is significant
/// only where it separates two identifier/number characters, so `a+b` and
/// `A + B` normalize identically while `A B` stays distinct from `AB`.
pub fn normalize_expr(expr: &str) -> String {
    let mut pieces: Vec<String> = Vec::new();
    for token in tokenize(expr) {
        match token.kind {
            TokenKind::Comment => {}
            TokenKind::Word => pieces.push(token.text.to_uppercase()),
            TokenKind::Literal | TokenKind::QuotedIdent | TokenKind::BindVariable => {
                pieces.push(token.text.to_string());
            }
            TokenKind::Other => {
                pieces.extend(token.text.split_whitespace().map(str::to_string));
            }
        }
    }

    let mut out = String::with_capacity(expr.len());
    for piece in pieces {
        let needs_space = out.chars().last().is_some_and(joins_words)
            && piece.chars().next().is_some_and(joins_words);
        if needs_space {
            out.push(' ');
        }
        out.push_str(&piece);
    }

    strip_redundant_parens(&out)
}

/// Whether a space between two of these characters carries meaning.
fn joins_words(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '#'
}

/// Compare two expressions after normalization.
pub fn exprs_equivalent(a: &str, b: &str) -> bool {
    normalize_expr(a) == normalize_expr(b)
}

/// Strip parentheses that enclose the entire expression, repeatedly.
fn strip_redundant_parens(expr: &str) -> String {
    let mut s = expr.trim();
    while s.starts_with('(') && s.ends_with(')') && wraps_whole(s) {
        s = s[1..s.len() - 1].trim();
    }
    s.to_string()
}

/// Whether the opening paren at byte 0 matches the closing paren at the end.
fn wraps_whole(s: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = match depth.checked_sub(1) {
                    Some(d) => d,
                    None => return false,
                };
                if depth == 0 && i != s.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
