//! JSON snapshot metadata provider.
//!
//! A snapshot is one JSON file per side, pre-extracted from the live
//! database: a feature version plus a flat object list. The provider
//! serves `load` calls per schema by filtering the list, so the loader's
//! partitioning works identically for snapshots and live connections.

use crate::error::{MetaError, MetaResult};
use crate::traits::{DdlSource, MetadataProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sr_core::object::{ObjectRef, SchemaObject};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk snapshot layout.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub feature_version: String,
    pub objects: Vec<SchemaObject>,
}

/// Metadata provider backed by a loaded snapshot file.
#[derive(Debug)]
pub struct SnapshotProvider {
    feature_version: String,
    objects: Vec<SchemaObject>,
}

impl SnapshotProvider {
    /// Load a snapshot JSON file.
    pub fn from_file(path: &Path) -> MetaResult<Self> {
        if !path.exists() {
            return Err(MetaError::SnapshotNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| MetaError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| MetaError::SnapshotParse {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;
        log::info!(
            "loaded snapshot {} ({} objects, version {})",
            path.display(),
            snapshot.objects.len(),
            snapshot.feature_version
        );
        Ok(Self {
            feature_version: snapshot.feature_version,
            objects: snapshot.objects,
        })
    }

    /// All objects in the snapshot, for DDL-source construction.
    pub fn objects(&self) -> &[SchemaObject] {
        &self.objects
    }

    /// The schemas present in this snapshot, deduplicated and sorted.
    pub fn schemas(&self) -> Vec<String> {
        let mut owners: Vec<String> = self.objects.iter().map(|o| o.owner.to_string()).collect();
        owners.sort();
        owners.dedup();
        owners
    }
}

#[async_trait]
impl MetadataProvider for SnapshotProvider {
    async fn load(&self, schema: &str) -> MetaResult<Vec<SchemaObject>> {
        Ok(self
            .objects
            .iter()
            .filter(|o| o.owner == *schema)
            .cloned()
            .collect())
    }

    async fn feature_version(&self) -> MetaResult<String> {
        Ok(self.feature_version.clone())
    }
}

/// DDL source backed by the `ddl` captures inside a snapshot.
#[derive(Debug, Default)]
pub struct SnapshotDdlSource {
    ddl: BTreeMap<ObjectRef, String>,
}

impl SnapshotDdlSource {
    pub fn from_objects<'a>(objects: impl IntoIterator<Item = &'a SchemaObject>) -> Self {
        let ddl = objects
            .into_iter()
            .filter_map(|o| o.ddl.as_ref().map(|d| (o.object_ref(), d.clone())))
            .collect();
        Self { ddl }
    }
}

impl DdlSource for SnapshotDdlSource {
    fn ddl(&self, object: &ObjectRef) -> MetaResult<String> {
        self.ddl
            .get(object)
            .cloned()
            .ok_or_else(|| MetaError::DdlUnavailable {
                object: object.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
