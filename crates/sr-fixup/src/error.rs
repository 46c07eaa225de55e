//! Error types for sr-fixup

use thiserror::Error;

/// Fixup synthesis errors
#[derive(Error, Debug)]
pub enum FixupError {
    /// F001: CREATE OR REPLACE requested for a type that does not support it
    #[error("[F001] {object} is not a replaceable type; use a guard mode instead")]
    ReplaceUnsupported { object: String },
}

/// Result type alias for FixupError
pub type FixupResult<T> = Result<T, FixupError>;
