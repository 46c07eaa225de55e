//! Schemarec command line entry point.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        Commands::Reconcile(args) => commands::reconcile::execute(args, &cli.global).await,
        Commands::Classify(args) => commands::classify::execute(args, &cli.global).await,
        Commands::Remap(args) => commands::remap::execute(args, &cli.global).await,
    }
}
