//! Subcommand implementations.

pub mod classify;
pub mod common;
pub mod reconcile;
pub mod remap;
