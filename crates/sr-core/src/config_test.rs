use super::*;
use std::io::Write;

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.guard_mode, IdempotencyMode::Guard);
    assert_eq!(config.abort_policy, AbortPolicy::BestEffort);
    assert!(config.effective_load_workers() >= 1);
    assert!(config.effective_load_workers() <= MAX_LOAD_WORKERS);
}

#[test]
fn test_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "schemas: [HR, APP]\nguard_mode: drop_create\nabort_policy: all_or_nothing\nload_workers: 4\nexistence_only_types: [SYNONYM]"
    )
    .unwrap();

    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.schemas, vec!["HR", "APP"]);
    assert_eq!(config.guard_mode, IdempotencyMode::DropCreate);
    assert_eq!(config.abort_policy, AbortPolicy::AllOrNothing);
    assert_eq!(config.effective_load_workers(), 4);
    assert!(config.is_existence_only(&crate::object::ObjectType::Synonym));
    assert!(!config.is_existence_only(&crate::object::ObjectType::Table));
}

#[test]
fn test_missing_file() {
    let err = EngineConfig::from_file(std::path::Path::new("/nonexistent/sr.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_invalid_guard_mode_rejected() {
    let config = EngineConfig {
        guard_mode: IdempotencyMode::Replace,
        ..Default::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_zero_workers_rejected() {
    let config = EngineConfig {
        load_workers: Some(0),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}
