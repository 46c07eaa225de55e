//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Schemarec - schema reconciliation between partially compatible dialects
#[derive(Parser, Debug)]
#[command(name = "sr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify, synthesize fixups, and emit the full plan
    Reconcile(ReconcileArgs),

    /// Classify only and emit the report
    Classify(ClassifyArgs),

    /// Resolve and emit the remap edges
    Remap(RemapArgs),
}

/// Inputs shared by every pipeline command
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Source-side metadata snapshot (JSON)
    #[arg(long)]
    pub source: String,

    /// Target-side metadata snapshot (JSON)
    #[arg(long)]
    pub target: String,

    /// Remap rule file (YAML)
    #[arg(long)]
    pub remap_rules: Option<String>,

    /// Auxiliary snapshot consulted for DDL the source snapshot lacks
    #[arg(long)]
    pub ddl_fallback: Option<String>,

    /// Write JSON output here instead of stdout
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Arguments for the reconcile command
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Classification rule file (YAML)
    #[arg(long)]
    pub rules: Option<String>,
}

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Classification rule file (YAML)
    #[arg(long)]
    pub rules: Option<String>,
}

/// Arguments for the remap command
#[derive(Args, Debug)]
pub struct RemapArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}
