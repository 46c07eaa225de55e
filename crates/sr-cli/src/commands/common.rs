//! Shared pipeline plumbing for the subcommands.

use anyhow::{Context, Result};
use sr_classify::{ClassificationReport, FeatureVersion, Status};
use sr_core::config::EngineConfig;
use sr_core::model::ObjectModel;
use sr_core::object::Side;
use sr_core::summary::RunSummary;
use sr_meta::{load_side, MetadataProvider, SnapshotDdlSource, SnapshotProvider};
use sr_remap::rules::RemapRuleSet;
use sr_remap::{build_dependency_graph, RemapMap, RemapResolver};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{GlobalArgs, PipelineArgs};

/// Everything loaded and resolved before classification runs.
pub struct PipelineContext {
    pub config: EngineConfig,
    pub model: ObjectModel,
    pub remap: RemapMap,
    pub graph: sr_core::graph::DependencyGraph,
    pub target_version: FeatureVersion,
    pub ddl_source: SnapshotDdlSource,
    pub ddl_fallback: Option<SnapshotDdlSource>,
    pub summary: RunSummary,
}

/// Load both sides, resolve the remap, and build the dependency graph.
pub async fn load_pipeline(args: &PipelineArgs, global: &GlobalArgs) -> Result<PipelineContext> {
    let config = match &global.config {
        Some(path) => EngineConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load engine config {path}"))?,
        None => EngineConfig::default(),
    };

    let source = SnapshotProvider::from_file(Path::new(&args.source))
        .with_context(|| format!("failed to load source snapshot {}", args.source))?;
    let target = SnapshotProvider::from_file(Path::new(&args.target))
        .with_context(|| format!("failed to load target snapshot {}", args.target))?;

    let ddl_source = SnapshotDdlSource::from_objects(source.objects());
    let ddl_fallback = match &args.ddl_fallback {
        Some(path) => {
            let aux = SnapshotProvider::from_file(Path::new(path))
                .with_context(|| format!("failed to load DDL fallback snapshot {path}"))?;
            Some(SnapshotDdlSource::from_objects(aux.objects()))
        }
        None => None,
    };

    // Schema filter from config, falling back to everything the snapshot has.
    let source_schemas = if config.schemas.is_empty() {
        source.schemas()
    } else {
        config.schemas.clone()
    };
    let target_schemas = if config.schemas.is_empty() {
        target.schemas()
    } else {
        config.schemas.clone()
    };

    let mut summary = RunSummary::new();
    let mut model = ObjectModel::new();

    let target_version_str = target.feature_version().await?;
    let target_version: FeatureVersion = target_version_str
        .parse()
        .with_context(|| format!("target reported feature version '{target_version_str}'"))?;

    let source: Arc<dyn MetadataProvider> = Arc::new(source);
    let target: Arc<dyn MetadataProvider> = Arc::new(target);
    load_side(source, &source_schemas, Side::Source, &config, &mut model, &mut summary)
        .await
        .context("source metadata load failed")?;
    load_side(target, &target_schemas, Side::Target, &config, &mut model, &mut summary)
        .await
        .context("target metadata load failed")?;

    let remap_rules = match &args.remap_rules {
        Some(path) => RemapRuleSet::from_file(Path::new(path))
            .with_context(|| format!("failed to load remap rules {path}"))?,
        None => RemapRuleSet::default(),
    };
    let remap = RemapResolver::new(&remap_rules).resolve_all(&model, &mut summary);
    let graph = build_dependency_graph(&model, &remap);

    Ok(PipelineContext {
        config,
        model,
        remap,
        graph,
        target_version,
        ddl_source,
        ddl_fallback,
        summary,
    })
}

/// Log per-status counts for a classification report.
pub fn log_report(report: &ClassificationReport) {
    log::info!(
        "classified {} objects: {} ok, {} missing, {} unsupported, {} blocked, {} skipped",
        report.results.len(),
        report.count_with(Status::Ok),
        report.count_with(Status::Missing),
        report.count_with(Status::Unsupported),
        report.count_with(Status::Blocked),
        report.count_with(Status::Skipped),
    );
    if !report.cycle_groups.is_empty() {
        log::warn!("{} cyclic dependency groups detected", report.cycle_groups.len());
    }
}

/// Log the run summary tail: event counts and any recorded failures.
pub fn log_summary(summary: &RunSummary) {
    let failures = summary.failure_count();
    if failures > 0 {
        log::warn!("{} events recorded, {failures} failures", summary.events.len());
    } else {
        log::info!("{} events recorded", summary.events.len());
    }
    for event in &summary.events {
        if event.severity == sr_core::summary::EventSeverity::Failure {
            match &event.object {
                Some(object) => log::warn!("  [{}] {object}: {}", event.reason, event.detail),
                None => log::warn!("  [{}] {}", event.reason, event.detail),
            }
        }
    }
}

/// Emit a JSON document to `--out` or stdout.
pub fn emit_json(value: &serde_json::Value, out: Option<&str>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write output to {path}"))?;
            log::info!("wrote {path}");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
