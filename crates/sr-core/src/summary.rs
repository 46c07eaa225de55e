//! Run-level failure and fallback summary.
//!
//! Nothing in the engine is silently swallowed: every skip, fallback, and
//! isolated failure is recorded here with object identity and a reason
//! code, and the summary travels with the classification/fixup outputs.

use crate::object::ObjectRef;
use crate::reason::ReasonCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    Warning,
    Skip,
    Failure,
}

/// One recorded non-fatal condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub severity: EventSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectRef>,
    pub reason: ReasonCode,
    pub detail: String,
}

/// Aggregated record of one engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub events: Vec<RunEvent>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            events: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        severity: EventSeverity,
        object: Option<ObjectRef>,
        reason: ReasonCode,
        detail: impl Into<String>,
    ) {
        self.events.push(RunEvent {
            severity,
            object,
            reason,
            detail: detail.into(),
        });
    }

    /// Record a skipped comparison or fixup.
    pub fn record_skip(&mut self, object: ObjectRef, reason: ReasonCode, detail: impl Into<String>) {
        self.record(EventSeverity::Skip, Some(object), reason, detail);
    }

    /// Record a fallback (e.g. ambiguous remap resolved by default policy).
    pub fn record_fallback(
        &mut self,
        object: Option<ObjectRef>,
        reason: ReasonCode,
        detail: impl Into<String>,
    ) {
        self.record(EventSeverity::Warning, object, reason, detail);
    }

    /// Record an isolated failure (e.g. one rule's evaluation).
    pub fn record_failure(
        &mut self,
        object: Option<ObjectRef>,
        reason: ReasonCode,
        detail: impl Into<String>,
    ) {
        self.record(EventSeverity::Failure, object, reason, detail);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn failure_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.severity == EventSeverity::Failure)
            .count()
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
