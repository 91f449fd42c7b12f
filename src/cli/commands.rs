//! CLI command definitions using clap.
//!
//! - no subcommand: launch the TUI
//! - plan: submit tasks once and print the schedule

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::planner::{RequestEncoding, ResponseShape};

/// dayflow - turn today's task list into an optimized schedule
#[derive(Parser, Debug)]
#[command(name = "dayflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Planning service flags; each overrides the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// Planning service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Endpoint path on the planning service (e.g. /plan, /schedule)
    #[arg(long, global = true, value_name = "PATH")]
    pub endpoint: Option<String>,

    /// How tasks are encoded in the request body
    #[arg(long, global = true, value_enum)]
    pub request_encoding: Option<RequestEncoding>,

    /// Which response envelope the service returns
    #[arg(long, global = true, value_enum)]
    pub response_shape: Option<ResponseShape>,
}

impl ApiArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            endpoint: self.endpoint.clone(),
            request_encoding: self.request_encoding,
            response_shape: self.response_shape,
        }
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit tasks once and print the schedule
    Plan {
        /// Tasks for today
        tasks: Vec<String>,

        /// Also read tasks from stdin, one per line
        #[arg(long)]
        stdin: bool,

        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },
}
