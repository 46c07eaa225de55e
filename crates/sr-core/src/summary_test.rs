use super::*;
use crate::object::ObjectType;

#[test]
fn test_events_recorded_with_identity() {
    let mut summary = RunSummary::new();
    let obj = ObjectRef::new("HR", "T1", ObjectType::Table);
    summary.record_skip(obj.clone(), ReasonCode::DdlUnavailable, "both sources failed");
    summary.record_fallback(None, ReasonCode::AmbiguousRemap, "defaulted to source schema");
    summary.record_failure(Some(obj), ReasonCode::PrivilegeGap, "rule r42 failed");

    assert_eq!(summary.events.len(), 3);
    assert_eq!(summary.failure_count(), 1);
    assert_eq!(summary.events[0].severity, EventSeverity::Skip);
    assert_eq!(summary.events[0].object.as_ref().unwrap().name, "T1");
}

#[test]
fn test_finish_stamps_time() {
    let mut summary = RunSummary::new();
    assert!(summary.finished_at.is_none());
    summary.finish();
    assert!(summary.finished_at.is_some());
}

#[test]
fn test_serializes_to_json() {
    let mut summary = RunSummary::new();
    summary.record_fallback(None, ReasonCode::BlockedByCycle, "cycle P1<->P2");
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("BLOCKED_BY_CYCLE"));
    assert!(json.contains("run_id"));
}
