//! Name patterns for rule matching.
//!
//! Rules match object names with LIKE-style patterns: `%` matches any run
//! of characters, `_` matches exactly one. Everything else is literal —
//! regex metacharacters in the pattern are escaped, so a rule naming
//! `T$AUDIT` matches that name and nothing else.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A compiled name pattern.
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile a LIKE-style pattern. Matching is case-sensitive because
    /// catalog identifiers arrive in canonical case.
    pub fn compile(pattern: &str) -> Self {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');
        for c in pattern.chars() {
            match c {
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                other => expr.push_str(&regex::escape(&other.to_string())),
            }
        }
        expr.push('$');
        // The constructed expression is always valid: every non-wildcard
        // character is escaped.
        let regex = Regex::new(&expr).unwrap_or_else(|_| Regex::new("^$").unwrap());
        Self {
            raw: pattern.to_string(),
            regex,
        }
    }

    /// Whether the pattern contains a wildcard at all.
    pub fn is_literal(&self) -> bool {
        !self.raw.contains(['%', '_'])
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Serialize for NamePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for NamePattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::compile(&s))
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod tests;
