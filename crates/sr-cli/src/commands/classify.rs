//! Classification only, without fixup synthesis.

use anyhow::{Context, Result};
use serde_json::json;
use sr_classify::{Classifier, RuleSet};
use std::path::Path;

use crate::cli::{ClassifyArgs, GlobalArgs};
use crate::commands::common::{emit_json, load_pipeline, log_report, log_summary};

pub async fn execute(args: &ClassifyArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = load_pipeline(&args.pipeline, global).await?;

    let rules = match &args.rules {
        Some(path) => RuleSet::from_file(Path::new(path))
            .with_context(|| format!("failed to load classification rules {path}"))?,
        None => RuleSet::default(),
    };

    let classifier = Classifier::new(&ctx.config, &rules, ctx.target_version.clone());
    let report = classifier.classify(&ctx.model, &ctx.remap, &ctx.graph, &mut ctx.summary)?;
    ctx.summary.finish();

    let output = json!({
        "report": report,
        "summary": ctx.summary,
    });
    emit_json(&output, args.pipeline.out.as_deref())?;

    log_report(&report);
    log_summary(&ctx.summary);
    Ok(())
}
