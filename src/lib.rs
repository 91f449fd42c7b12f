//! dayflow - a terminal client for a remote day-planning service
//!
//! Collect today's tasks, send them to the planning service, and show the
//! schedule it proposes. No scheduling happens locally.

pub mod cli;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod planner;
pub mod session;
pub mod tui;

pub use error::{PlannerError, Result, SUBMISSION_FAILED_MESSAGE};
