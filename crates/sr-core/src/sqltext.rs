//! SQL text scanning for safe masking and rewriting.
//!
//! The engine never parses SQL into an AST. Instead, captured DDL text is
//! scanned once into a flat `(kind, span, text)` token stream; passes that
//! compare or rewrite text then operate only on the kinds they are allowed
//! to touch. String literals, comments, quoted identifiers, and bind
//! variables are protected kinds: no rewrite ever modifies their content.
//!
//! Unterminated literals or comments extend to the end of the input rather
//! than failing the scan; the trailing text stays protected either way.

use serde::Serialize;

/// Lexical class of a scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `'...'` string literal, including `''` escapes
    Literal,
    /// `-- ...` or `/* ... */` comment
    Comment,
    /// `"..."` quoted identifier
    QuotedIdent,
    /// `:name` bind variable
    BindVariable,
    /// Bare identifier or keyword
    Word,
    /// Everything else: whitespace, punctuation, operators, numbers
    Other,
}

/// One scanned span of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte offset of the span start in the original text
    pub start: usize,
    pub text: &'a str,
}

impl Token<'_> {
    /// Byte offset one past the end of the span.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '#'
}

/// Scan SQL text into a complete token stream.
///
/// The concatenation of all token texts reproduces the input exactly.
pub fn tokenize(sql: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = sql.as_bytes();
    let mut pos = 0;
    let mut other_start: Option<usize> = None;

    // Close out a pending run of uninteresting bytes.
    macro_rules! flush_other {
        () => {
            if let Some(start) = other_start.take() {
                tokens.push(Token {
                    kind: TokenKind::Other,
                    start,
                    text: &sql[start..pos],
                });
            }
        };
    }

    while pos < bytes.len() {
        let rest = &sql[pos..];
        let c = rest.chars().next().unwrap_or('\0');

        if c == '\'' {
            flush_other!();
            let end = scan_literal(rest);
            tokens.push(Token {
                kind: TokenKind::Literal,
                start: pos,
                text: &rest[..end],
            });
            pos += end;
        } else if rest.starts_with("--") {
            flush_other!();
            let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
            tokens.push(Token {
                kind: TokenKind::Comment,
                start: pos,
                text: &rest[..end],
            });
            pos += end;
        } else if rest.starts_with("/*") {
            flush_other!();
            let end = rest.find("*/").map_or(rest.len(), |i| i + 2);
            tokens.push(Token {
                kind: TokenKind::Comment,
                start: pos,
                text: &rest[..end],
            });
            pos += end;
        } else if c == '"' {
            flush_other!();
            let end = rest[1..].find('"').map_or(rest.len(), |i| i + 2);
            tokens.push(Token {
                kind: TokenKind::QuotedIdent,
                start: pos,
                text: &rest[..end],
            });
            pos += end;
        } else if c == ':' && rest[1..].chars().next().is_some_and(is_word_start) {
            flush_other!();
            let end = 1 + word_len(&rest[1..]);
            tokens.push(Token {
                kind: TokenKind::BindVariable,
                start: pos,
                text: &rest[..end],
            });
            pos += end;
        } else if is_word_start(c) {
            flush_other!();
            let end = word_len(rest);
            tokens.push(Token {
                kind: TokenKind::Word,
                start: pos,
                text: &rest[..end],
            });
            pos += end;
        } else {
            if other_start.is_none() {
                other_start = Some(pos);
            }
            pos += c.len_utf8();
        }
    }
    flush_other!();

    tokens
}

/// Length of a `'...'` literal at the start of `rest`, honoring `''` escapes.
fn scan_literal(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    rest.len()
}

fn word_len(rest: &str) -> usize {
    rest.char_indices()
        .find(|(_, c)| !is_word_continue(*c))
        .map_or(rest.len(), |(i, _)| i)
}

#[cfg(test)]
#[path = "sqltext_test.rs"]
mod tests;
