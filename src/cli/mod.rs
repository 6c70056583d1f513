//! Command-line interface for history-enricher.
//!
//! This module provides the `enrich`, `check` and `init-config` commands.

mod commands;

pub use commands::{Cli, Commands, EnrichOptions, run_command};
