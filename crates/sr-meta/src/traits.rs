//! Metadata provider traits.

use crate::error::{MetaError, MetaResult};
use async_trait::async_trait;
use sr_core::object::{ObjectRef, SchemaObject};

/// A source of schema metadata for one side of the reconciliation.
///
/// Implementations must be Send + Sync: the loader fans partitions out
/// across a bounded task pool.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Load every object owned by one schema.
    async fn load(&self, schema: &str) -> MetaResult<Vec<SchemaObject>>;

    /// The dotted-numeric feature version this side reports.
    async fn feature_version(&self) -> MetaResult<String>;
}

/// A source of captured DDL text for one object.
pub trait DdlSource: Send + Sync {
    fn ddl(&self, object: &ObjectRef) -> MetaResult<String>;
}

/// A primary DDL source with a fallback tried on any failure.
///
/// Both failing is not fatal here; the synthesizer records a skip with a
/// reason for the affected object and moves on.
pub struct ChainedDdlSource<'a> {
    primary: &'a dyn DdlSource,
    fallback: Option<&'a dyn DdlSource>,
}

impl<'a> ChainedDdlSource<'a> {
    pub fn new(primary: &'a dyn DdlSource, fallback: Option<&'a dyn DdlSource>) -> Self {
        Self { primary, fallback }
    }
}

impl DdlSource for ChainedDdlSource<'_> {
    fn ddl(&self, object: &ObjectRef) -> MetaResult<String> {
        match self.primary.ddl(object) {
            Ok(ddl) => Ok(ddl),
            Err(primary_err) => match self.fallback {
                Some(fallback) => fallback.ddl(object).map_err(|fallback_err| {
                    log::warn!(
                        "both DDL sources failed for {object}: {primary_err}; {fallback_err}"
                    );
                    MetaError::DdlUnavailable {
                        object: object.to_string(),
                    }
                }),
                None => Err(primary_err),
            },
        }
    }
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
