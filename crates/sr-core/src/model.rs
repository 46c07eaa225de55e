//! Side-keyed store of loaded schema objects.

use crate::error::{CoreError, CoreResult};
use crate::object::{ObjectRef, SchemaObject, Side};
use std::collections::BTreeMap;

/// All loaded metadata for both sides, keyed by canonical object identity.
///
/// A `BTreeMap` keeps iteration in canonical key order, which is what
/// makes report ordering deterministic regardless of load parallelism.
#[derive(Debug, Default)]
pub struct ObjectModel {
    source: BTreeMap<ObjectRef, SchemaObject>,
    target: BTreeMap<ObjectRef, SchemaObject>,
}

impl ObjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: Side) -> &BTreeMap<ObjectRef, SchemaObject> {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<ObjectRef, SchemaObject> {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    /// Insert one object; duplicate identity on the same side is an error.
    pub fn insert(&mut self, side: Side, object: SchemaObject) -> CoreResult<()> {
        let key = object.object_ref();
        if self.side(side).contains_key(&key) {
            return Err(CoreError::DuplicateObject {
                side: side.to_string(),
                object: key.to_string(),
            });
        }
        self.side_mut(side).insert(key, object);
        Ok(())
    }

    /// Merge a loader partition into the model.
    pub fn merge_partition(&mut self, side: Side, objects: Vec<SchemaObject>) -> CoreResult<()> {
        for object in objects {
            self.insert(side, object)?;
        }
        Ok(())
    }

    /// Look up an object by identity.
    pub fn get(&self, side: Side, object: &ObjectRef) -> Option<&SchemaObject> {
        self.side(side).get(object)
    }

    /// Look up ignoring object type, for synonym/base resolution where the
    /// referenced type is not recorded in metadata.
    pub fn get_by_name(&self, side: Side, owner: &str, name: &str) -> Option<&SchemaObject> {
        self.side(side)
            .values()
            .find(|o| o.owner == *owner && o.name == *name)
    }

    /// All objects on a side, in canonical key order.
    pub fn objects(&self, side: Side) -> impl Iterator<Item = &SchemaObject> {
        self.side(side).values()
    }

    /// Number of objects on a side.
    pub fn len(&self, side: Side) -> usize {
        self.side(side).len()
    }

    /// Whether a side holds no objects at all.
    pub fn is_empty(&self, side: Side) -> bool {
        self.side(side).is_empty()
    }

    /// Fail if the target side is empty: classification would be meaningless.
    pub fn require_target(&self) -> CoreResult<()> {
        if self.target.is_empty() {
            return Err(CoreError::EmptyTargetModel {
                detail: "no objects loaded for the target side".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
