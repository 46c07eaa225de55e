//! Machine-readable reason codes for classification, skips, and fallbacks.
//!
//! Every non-OK outcome in the engine carries one of these codes so the
//! reporting layer can render an actionable message without re-deriving
//! the cause. The set is closed except for `Unknown`, which preserves
//! codes produced by newer rule files without losing them.

use serde::{Deserialize, Serialize};

/// Why an object or attribute was classified the way it was.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Object/attribute matches on both sides after normalization
    Compatible,
    /// Object exists on the source but not on the target
    NotInTarget,
    /// Source-side DDL uses syntax the target dialect cannot express
    DialectSyntax,
    /// Source type has no target equivalent
    UnsupportedType,
    /// Type exists on the target but is deprecated; conversion is advisory
    DeprecatedType,
    /// A dependency of this object is missing or unsupported
    BlockedByDependency,
    /// Object participates in a dependency cycle
    BlockedByCycle,
    /// Matched a blacklist rule
    Blacklisted,
    /// Required metadata was unavailable on one side
    MetadataGap,
    /// Missing privilege prevented a rule or extraction from running
    PrivilegeGap,
    /// Both primary and fallback DDL extraction failed
    DdlUnavailable,
    /// Comparison deliberately limited to existence for this object kind
    ExistenceOnly,
    /// Remap inference was inconclusive; default policy applied
    AmbiguousRemap,
    /// Rule was skipped (disabled or outside its version gate)
    RuleSkipped,
    /// Actionable drift synthesis does not cover; an operator must act
    ManualFixup,
    /// A code this build does not know; kept verbatim for reporting
    #[serde(untagged)]
    Unknown(String),
}

impl ReasonCode {
    /// Parse a code string, falling back to `Unknown` for unrecognized values.
    pub fn parse(code: &str) -> Self {
        match code {
            "COMPATIBLE" => Self::Compatible,
            "NOT_IN_TARGET" => Self::NotInTarget,
            "DIALECT_SYNTAX" => Self::DialectSyntax,
            "UNSUPPORTED_TYPE" => Self::UnsupportedType,
            "DEPRECATED_TYPE" => Self::DeprecatedType,
            "BLOCKED_BY_DEPENDENCY" => Self::BlockedByDependency,
            "BLOCKED_BY_CYCLE" => Self::BlockedByCycle,
            "BLACKLISTED" => Self::Blacklisted,
            "METADATA_GAP" => Self::MetadataGap,
            "PRIVILEGE_GAP" => Self::PrivilegeGap,
            "DDL_UNAVAILABLE" => Self::DdlUnavailable,
            "EXISTENCE_ONLY" => Self::ExistenceOnly,
            "AMBIGUOUS_REMAP" => Self::AmbiguousRemap,
            "RULE_SKIPPED" => Self::RuleSkipped,
            "MANUAL_FIXUP" => Self::ManualFixup,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The canonical wire form of this code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Compatible => "COMPATIBLE",
            Self::NotInTarget => "NOT_IN_TARGET",
            Self::DialectSyntax => "DIALECT_SYNTAX",
            Self::UnsupportedType => "UNSUPPORTED_TYPE",
            Self::DeprecatedType => "DEPRECATED_TYPE",
            Self::BlockedByDependency => "BLOCKED_BY_DEPENDENCY",
            Self::BlockedByCycle => "BLOCKED_BY_CYCLE",
            Self::Blacklisted => "BLACKLISTED",
            Self::MetadataGap => "METADATA_GAP",
            Self::PrivilegeGap => "PRIVILEGE_GAP",
            Self::DdlUnavailable => "DDL_UNAVAILABLE",
            Self::ExistenceOnly => "EXISTENCE_ONLY",
            Self::AmbiguousRemap => "AMBIGUOUS_REMAP",
            Self::RuleSkipped => "RULE_SKIPPED",
            Self::ManualFixup => "MANUAL_FIXUP",
            Self::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an attribute difference was suppressed rather than reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionTag {
    /// Types differ only in dialect spelling (alias equivalence)
    TypeAlias,
    /// Numeric precision/scale fall in the same equivalence class
    NumericEquivalence,
    /// Expressions are equal after masking and whitespace normalization
    NormalizedExpression,
    /// Facet is excluded for this object kind (existence-only comparison)
    ExistenceOnlyKind,
}

#[cfg(test)]
#[path = "reason_test.rs"]
mod tests;
