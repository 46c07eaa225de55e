//! sr-fixup - Fixup synthesizer for Schemarec
//!
//! Rewrites captured DDL into remapped coordinates over a protected token
//! stream, wraps statements for idempotent re-execution, and orders the
//! resulting actions by dependency layer.

pub mod error;
pub mod rewrite;
pub mod synth;
pub mod wrap;

pub use error::{FixupError, FixupResult};
pub use rewrite::DdlRewriter;
pub use synth::{FixupAction, FixupPlan, FixupSynthesizer, OrderingKey, Phase};
pub use wrap::{mode_for, wrap_statement};
