//! Domain types for dayflow
//!
//! - Task / TaskList: what the user wants to get done today
//! - Schedule / ScheduleEntry: what the planning service proposes

pub mod schedule;
pub mod task;

pub use schedule::{Explanation, Schedule, ScheduleEntry};
pub use task::{Task, TaskList};
