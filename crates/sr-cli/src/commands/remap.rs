//! Resolve and emit the remap edges.

use anyhow::Result;
use serde_json::json;
use sr_remap::RemapEdge;

use crate::cli::{GlobalArgs, RemapArgs};
use crate::commands::common::{emit_json, load_pipeline, log_summary};

pub async fn execute(args: &RemapArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = load_pipeline(&args.pipeline, global).await?;
    ctx.summary.finish();

    let edges: Vec<&RemapEdge> = ctx.remap.iter().map(|(_, edge)| edge).collect();
    let moved = edges.iter().filter(|e| !e.is_identity()).count();

    let output = json!({
        "edges": edges,
        "summary": ctx.summary,
    });
    emit_json(&output, args.pipeline.out.as_deref())?;

    log::info!("{} remap edges resolved, {moved} move or rename", edges.len());
    log_summary(&ctx.summary);
    Ok(())
}
