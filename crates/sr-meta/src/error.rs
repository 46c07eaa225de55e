//! Error types for sr-meta

use thiserror::Error;

/// Metadata loading errors
#[derive(Error, Debug)]
pub enum MetaError {
    /// M001: Snapshot file not found
    #[error("[M001] Metadata snapshot not found: {path}")]
    SnapshotNotFound { path: String },

    /// M002: Snapshot failed to parse
    #[error("[M002] Failed to parse snapshot {path}: {details}")]
    SnapshotParse { path: String, details: String },

    /// M003: One load partition failed
    #[error("[M003] Metadata load failed for schema '{schema}': {details}")]
    PartitionFailed { schema: String, details: String },

    /// M004: Run aborted under the all-or-nothing policy
    #[error("[M004] Load aborted: partition for schema '{schema}' failed: {details}")]
    Aborted { schema: String, details: String },

    /// M005: DDL unavailable from this source
    #[error("[M005] No DDL available for {object}")]
    DdlUnavailable { object: String },

    /// M006: IO error
    #[error("[M006] IO error reading '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// Fatal model-level condition surfaced from sr-core
    #[error(transparent)]
    Core(#[from] sr_core::error::CoreError),
}

/// Result type alias for MetaError
pub type MetaResult<T> = Result<T, MetaError>;
