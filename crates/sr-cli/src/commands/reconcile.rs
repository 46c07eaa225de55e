//! Full pipeline: classify, then synthesize the fixup plan.

use anyhow::{Context, Result};
use serde_json::json;
use sr_classify::{Classifier, RuleSet};
use sr_fixup::FixupSynthesizer;
use sr_meta::{ChainedDdlSource, DdlSource};
use std::path::Path;

use crate::cli::{GlobalArgs, ReconcileArgs};
use crate::commands::common::{emit_json, load_pipeline, log_report, log_summary};

pub async fn execute(args: &ReconcileArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = load_pipeline(&args.pipeline, global).await?;

    let rules = match &args.rules {
        Some(path) => RuleSet::from_file(Path::new(path))
            .with_context(|| format!("failed to load classification rules {path}"))?,
        None => RuleSet::default(),
    };

    let classifier = Classifier::new(&ctx.config, &rules, ctx.target_version.clone());
    let report = classifier.classify(&ctx.model, &ctx.remap, &ctx.graph, &mut ctx.summary)?;

    // Inline source captures first, the auxiliary snapshot when given.
    let ddl_chain = ChainedDdlSource::new(
        &ctx.ddl_source,
        ctx.ddl_fallback.as_ref().map(|f| f as &dyn DdlSource),
    );
    let plan = FixupSynthesizer::new(&ctx.config).synthesize(
        &ctx.model,
        &ctx.remap,
        &ctx.graph,
        &report,
        Some(&ddl_chain),
        &mut ctx.summary,
    )?;
    ctx.summary.finish();

    let output = json!({
        "report": report,
        "plan": plan,
        "summary": ctx.summary,
    });
    emit_json(&output, args.pipeline.out.as_deref())?;

    log_report(&report);
    log::info!("fixup plan: {} actions", plan.actions.len());
    log_summary(&ctx.summary);
    Ok(())
}
