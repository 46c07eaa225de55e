//! sr-meta - Metadata providers and loading for Schemarec
//!
//! Defines the async provider trait, the JSON snapshot provider, the
//! DDL source abstraction with primary/fallback chaining, and the
//! bounded-parallel loader with per-partition failure isolation.

pub mod error;
pub mod loader;
pub mod snapshot;
pub mod traits;

pub use error::{MetaError, MetaResult};
pub use loader::load_side;
pub use snapshot::{Snapshot, SnapshotDdlSource, SnapshotProvider};
pub use traits::{ChainedDdlSource, DdlSource, MetadataProvider};
