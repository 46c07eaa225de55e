//! Error types for sr-classify

use thiserror::Error;

/// Classification errors
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// C001: Rule file not found
    #[error("[C001] Classification rule file not found: {path}")]
    RuleFileNotFound { path: String },

    /// C002: Rule file failed to parse at the document level
    #[error("[C002] Failed to parse rule file {path}: {details}")]
    RuleFileParse { path: String, details: String },

    /// C003: Unparseable feature version token
    #[error("[C003] Invalid feature version '{token}'")]
    VersionParse { token: String },

    /// C004: IO error reading rule file
    #[error("[C004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// Fatal model-level condition surfaced from sr-core
    #[error(transparent)]
    Core(#[from] sr_core::error::CoreError),
}

/// Result type alias for ClassifyError
pub type ClassifyResult<T> = Result<T, ClassifyError>;
