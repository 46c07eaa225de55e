//! Error types for sr-core

use thiserror::Error;

/// Core error type for Schemarec
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Empty identifier where a non-empty one is required
    #[error("[E001] Empty identifier: {context}")]
    EmptyIdentifier { context: String },

    /// E002: Object not found in the loaded model
    #[error("[E002] Object not found: {object}")]
    ObjectNotFound { object: String },

    /// E003: Duplicate object loaded for the same side
    #[error("[E003] Duplicate object on {side} side: {object}")]
    DuplicateObject { side: String, object: String },

    /// E004: The target side of the model is empty; classification is meaningless
    #[error("[E004] Target metadata is empty: {detail}")]
    EmptyTargetModel { detail: String },

    /// E005: Invalid engine configuration value
    #[error("[E005] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E006: Configuration file not found
    #[error("[E006] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E007: IO error
    #[error("[E007] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E008: YAML parse error
    #[error("[E008] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
