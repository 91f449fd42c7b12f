//! CLI module for dayflow - command-line interface and subcommands.
//!
//! Provides the main entry point: the TUI by default, or a one-shot `plan`.

pub mod commands;
pub mod output;

pub use commands::{ApiArgs, Cli, Commands};
pub use output::{format_schedule, format_schedule_json};
