//! Bounded-parallel metadata loading.
//!
//! One task per schema partition, gated by a semaphore sized from the
//! engine configuration. Partitions fail in isolation: under the
//! best-effort policy a failed schema is recorded and the run continues
//! with the partitions that loaded; under all-or-nothing the first
//! failure aborts the load. Merging happens on the calling task only.

use crate::error::{MetaError, MetaResult};
use crate::traits::MetadataProvider;
use sr_core::config::{AbortPolicy, EngineConfig};
use sr_core::model::ObjectModel;
use sr_core::object::{SchemaObject, Side};
use sr_core::reason::ReasonCode;
use sr_core::summary::RunSummary;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Load every configured schema for one side into the model.
///
/// An empty target side after loading is fatal: classification against
/// nothing would mark the entire source model MISSING.
pub async fn load_side(
    provider: Arc<dyn MetadataProvider>,
    schemas: &[String],
    side: Side,
    config: &EngineConfig,
    model: &mut ObjectModel,
    summary: &mut RunSummary,
) -> MetaResult<()> {
    let semaphore = Arc::new(Semaphore::new(config.effective_load_workers()));
    let mut handles = Vec::with_capacity(schemas.len());

    for schema in schemas {
        let schema = schema.clone();
        let provider = Arc::clone(&provider);
        let semaphore = Arc::clone(&semaphore);

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        schema.clone(),
                        Err(MetaError::PartitionFailed {
                            schema,
                            details: "loader pool closed".to_string(),
                        }),
                    );
                }
            };
            let result = provider.load(&schema).await;
            (schema, result)
        }));
    }

    // Single-coordinator merge, in spawn order.
    for handle in handles {
        let (schema, result) = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                return Err(MetaError::PartitionFailed {
                    schema: "<unknown>".to_string(),
                    details: format!("load task panicked: {e}"),
                });
            }
        };

        match result {
            Ok(objects) => {
                log::debug!("loaded {} {side} objects for schema {schema}", objects.len());
                merge(model, side, objects)?;
            }
            Err(e) => match config.abort_policy {
                AbortPolicy::AllOrNothing => {
                    return Err(MetaError::Aborted {
                        schema,
                        details: e.to_string(),
                    });
                }
                AbortPolicy::BestEffort => {
                    log::warn!("{side} partition {schema} failed, continuing: {e}");
                    summary.record_failure(
                        None,
                        ReasonCode::MetadataGap,
                        format!("{side} schema {schema} not loaded: {e}"),
                    );
                }
            },
        }
    }

    if side == Side::Target {
        model.require_target()?;
    }
    Ok(())
}

fn merge(model: &mut ObjectModel, side: Side, objects: Vec<SchemaObject>) -> MetaResult<()> {
    model.merge_partition(side, objects)?;
    Ok(())
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
