//! Plain-terminal rendering of a schedule for the `plan` command.

use colored::*;

use crate::domain::{Explanation, Schedule};

pub const SCHEDULE_HEADING: &str = "Your Optimized Schedule";

/// Schedule as colored text, one entry per line
pub fn format_schedule(schedule: &Schedule) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", SCHEDULE_HEADING.bold()));

    if schedule.is_empty() {
        out.push_str(&format!("  {}\n", "(no entries returned)".dimmed()));
    }

    let width = schedule.tasks().iter().map(|e| e.time.chars().count()).max().unwrap_or(0);
    for (i, entry) in schedule.tasks().iter().enumerate() {
        out.push_str(&format!(
            "  {}  {}\n",
            format!("{:>width$}", entry.time, width = width).as_str().green().bold(),
            entry.task
        ));
        if let Some(why) = schedule.explanation_for(i) {
            out.push_str(&format!("  {:width$}  {}\n", "", why.dimmed(), width = width));
        }
    }

    if let Explanation::Summary(text) = schedule.explanation() {
        out.push_str(&format!("\n{}\n", text.italic()));
    }

    out
}

/// Schedule as pretty JSON
pub fn format_schedule_json(schedule: &Schedule) -> serde_json::Result<String> {
    serde_json::to_string_pretty(schedule)
}
