//! Classification results.

use serde::{Deserialize, Serialize};
use sr_core::diff::AttributeDiff;
use sr_core::object::ObjectRef;
use sr_core::reason::ReasonCode;

/// Final status of one object for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Present on the target and compatible (possibly with tracked drift)
    Ok,
    /// Absent on the target and creatable
    Missing,
    /// Cannot be migrated automatically
    Unsupported,
    /// Compatible itself, but depends on something that is not
    Blocked,
    /// Deliberately excluded from comparison
    Skipped,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Ok => "OK",
            Status::Missing => "MISSING",
            Status::Unsupported => "UNSUPPORTED",
            Status::Blocked => "BLOCKED",
            Status::Skipped => "SKIPPED",
        };
        f.write_str(s)
    }
}

/// One hop of a root-cause chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseEntry {
    pub object: ObjectRef,
    pub reason: ReasonCode,
}

/// The classification of one object, computed once per run and immutable.
///
/// `object` is the remapped (target-side) identity; `source` keeps the
/// original coordinates for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub object: ObjectRef,
    pub source: ObjectRef,
    pub status: Status,
    pub reason: ReasonCode,
    /// For BLOCKED: the path back to the first UNSUPPORTED or cyclic
    /// ancestor. Non-empty exactly when status is BLOCKED.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub root_cause_chain: Vec<RootCauseEntry>,
    /// Which blacklist source flagged the object, if a rule matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklist_source: Option<String>,
    /// Attribute-level differences for OK objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diffs: Vec<AttributeDiff>,
}

impl ClassificationResult {
    /// Whether this result carries actionable drift for the synthesizer.
    pub fn has_actionable_drift(&self) -> bool {
        self.status == Status::Ok && self.diffs.iter().any(AttributeDiff::is_actionable)
    }
}
