//! Error types for sr-remap

use thiserror::Error;

/// Remap resolution errors
#[derive(Error, Debug)]
pub enum RemapError {
    /// R001: Rule file not found
    #[error("[R001] Remap rule file not found: {path}")]
    RuleFileNotFound { path: String },

    /// R002: Rule file failed to parse
    #[error("[R002] Failed to parse remap rules {path}: {details}")]
    RuleParse { path: String, details: String },

    /// R003: IO error reading rule file
    #[error("[R003] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for RemapError
pub type RemapResult<T> = Result<T, RemapError>;
