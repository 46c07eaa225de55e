//! Safe rewriting of captured DDL into remapped coordinates.
//!
//! The rewriter works on the token stream from `sr_core::sqltext`, never
//! on raw text. String literals, comments, quoted identifiers, and bind
//! variables are protected kinds and pass through byte-for-byte. Of the
//! remaining words, two substitutions apply:
//!
//! - a qualified `OWNER.NAME` pair matching a remap edge is rewritten to
//!   the edge's target coordinates;
//! - a bare name is rewritten only when the rename is unambiguous across
//!   the rule set, the word is not in alias position (a bare identifier
//!   directly following another identifier), and it is not part of a
//!   dotted reference.

use sr_core::sqltext::{tokenize, Token, TokenKind};
use sr_remap::RemapMap;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Reserved words that never count as the identifier preceding an alias.
const KEYWORDS: &[&str] = &[
    "ADD", "AFTER", "ALL", "ALTER", "AND", "AS", "BEFORE", "BEGIN", "BETWEEN", "BODY", "BY",
    "CASCADE", "CASE", "CHECK", "COLUMN", "COMMENT", "COMMIT", "CONSTRAINT", "CREATE", "CROSS",
    "DECLARE", "DEFAULT", "DELETE", "DISTINCT", "DROP", "EACH", "ELSE", "ELSIF", "END", "EXISTS",
    "FOR", "FORCE", "FOREIGN", "FROM", "FULL", "FUNCTION", "GRANT", "GROUP", "HAVING", "IF", "IN",
    "INDEX", "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LOOP",
    "MATERIALIZED", "NOT", "NULL", "ON", "OPTION", "OR", "ORDER", "OUTER", "PACKAGE", "PRIMARY",
    "PROCEDURE", "PUBLIC", "REFERENCES", "RENAME", "REPLACE", "RETURN", "RIGHT", "ROLLBACK", "ROW",
    "SELECT", "SEQUENCE", "SET", "SYNONYM", "TABLE", "THEN", "TO", "TRIGGER", "TYPE", "UNION",
    "UNIQUE", "UPDATE", "USING", "VALUES", "VIEW", "WHEN", "WHERE", "WHILE", "WITH",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word.to_uppercase().as_str()).is_ok()
}

/// Token-level rewriter built from the resolved remap edges.
#[derive(Debug, Default)]
pub struct DdlRewriter {
    /// (OWNER, NAME) -> (target owner, target name), uppercase keys
    qualified: BTreeMap<(String, String), (String, String)>,
    /// NAME -> target name for unambiguous renames, uppercase keys
    bare: BTreeMap<String, String>,
}

impl DdlRewriter {
    pub fn from_remap(remap: &RemapMap) -> Self {
        let mut qualified = BTreeMap::new();
        let mut bare: BTreeMap<String, Option<String>> = BTreeMap::new();

        for (source, edge) in remap.iter() {
            if edge.is_identity() {
                continue;
            }
            qualified.insert(
                (
                    source.owner.to_string().to_uppercase(),
                    source.name.to_string().to_uppercase(),
                ),
                (
                    edge.target_owner.to_string(),
                    edge.target_name.to_string(),
                ),
            );

            if edge.target_name.as_str() != source.name.as_str() {
                let key = source.name.to_string().to_uppercase();
                let target = edge.target_name.to_string();
                // Conflicting renames for the same bare name disable it.
                match bare.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(Some(target));
                    }
                    Entry::Occupied(mut slot) => {
                        if slot.get().as_deref() != Some(target.as_str()) {
                            slot.insert(None);
                        }
                    }
                }
            }
        }

        Self {
            qualified,
            bare: bare
                .into_iter()
                .filter_map(|(k, v)| v.map(|t| (k, t)))
                .collect(),
        }
    }

    /// Rewrite one DDL text. Infallible: unrewritable spans pass through.
    pub fn rewrite(&self, sql: &str) -> String {
        let tokens = tokenize(sql);
        let mut out = String::with_capacity(sql.len());
        // Whether the previous significant token was an identifier
        // (non-keyword word or quoted identifier).
        let mut prev_is_identifier = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            match token.kind {
                TokenKind::Word => {
                    if let Some(consumed) = self.try_qualified(&tokens, i, &mut out) {
                        prev_is_identifier = true;
                        i += consumed;
                        continue;
                    }
                    self.emit_bare(&tokens, i, prev_is_identifier, &mut out);
                    prev_is_identifier = !is_keyword(token.text);
                }
                TokenKind::QuotedIdent => {
                    out.push_str(token.text);
                    prev_is_identifier = true;
                }
                TokenKind::Comment => {
                    // Comments never count as the preceding token for
                    // alias detection.
                    out.push_str(token.text);
                }
                TokenKind::Other => {
                    out.push_str(token.text);
                    if !token.text.trim().is_empty() {
                        prev_is_identifier = false;
                    }
                }
                _ => {
                    out.push_str(token.text);
                    prev_is_identifier = false;
                }
            }
            i += 1;
        }
        out
    }

    /// If tokens[i..] start a qualified `OWNER.NAME` with a remap entry,
    /// emit the rewritten pair and return how many tokens were consumed.
    fn try_qualified(&self, tokens: &[Token<'_>], i: usize, out: &mut String) -> Option<usize> {
        let owner = tokens.get(i)?;
        let dot = tokens.get(i + 1)?;
        let name = tokens.get(i + 2)?;
        if dot.kind != TokenKind::Other || dot.text.trim() != "." {
            return None;
        }
        if name.kind != TokenKind::Word {
            return None;
        }
        let key = (
            owner.text.to_uppercase(),
            name.text.to_uppercase(),
        );
        let (target_owner, target_name) = self.qualified.get(&key)?;
        out.push_str(target_owner);
        out.push_str(dot.text);
        out.push_str(target_name);
        Some(3)
    }

    fn emit_bare(
        &self,
        tokens: &[Token<'_>],
        i: usize,
        prev_is_identifier: bool,
        out: &mut String,
    ) {
        let token = &tokens[i];

        // Alias position: a bare identifier directly following another
        // identifier is never a reference.
        let alias_position = prev_is_identifier;
        // Part of a dotted reference on either side: the owner slot is
        // handled by the qualified pass, the member slot belongs to
        // whatever owns it.
        let after_dot = i
            .checked_sub(1)
            .and_then(|p| tokens.get(p))
            .is_some_and(|t| t.kind == TokenKind::Other && t.text.trim_end().ends_with('.'));
        let before_dot = tokens
            .get(i + 1)
            .is_some_and(|t| t.kind == TokenKind::Other && t.text.trim_start().starts_with('.'));

        if alias_position || after_dot || before_dot {
            out.push_str(token.text);
            return;
        }
        match self.bare.get(&token.text.to_uppercase()) {
            Some(target) => out.push_str(target),
            None => out.push_str(token.text),
        }
    }
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
