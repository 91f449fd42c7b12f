//! Schedule returned by the planning service, in the shape the views consume.

use serde::{Deserialize, Serialize};

/// One slot of the proposed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub time: String,
    pub task: String,
}

impl ScheduleEntry {
    pub fn new(time: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            task: task.into(),
        }
    }
}

/// Explanatory text attached to a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Explanation {
    /// One paragraph covering the whole day
    Summary(String),
    /// One explanation per entry, index-aligned with the entries
    PerEntry(Vec<String>),
}

/// A complete schedule. Either fully present or absent; never partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
    explanation: Explanation,
}

impl Schedule {
    /// Schedule with a single explanation for the whole day.
    pub fn summarized(entries: Vec<ScheduleEntry>, explanation: impl Into<String>) -> Self {
        Self {
            entries,
            explanation: Explanation::Summary(explanation.into()),
        }
    }

    /// Fold `(entry, explanation)` pairs into two aligned sequences.
    pub fn from_explained<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (ScheduleEntry, String)>,
    {
        let (entries, explanations) =
            items
                .into_iter()
                .fold((Vec::new(), Vec::new()), |(mut entries, mut explanations), (entry, why)| {
                    entries.push(entry);
                    explanations.push(why);
                    (entries, explanations)
                });

        Self {
            entries,
            explanation: Explanation::PerEntry(explanations),
        }
    }

    /// Entries in the order the service returned them.
    pub fn tasks(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn explanation(&self) -> &Explanation {
        &self.explanation
    }

    /// Per-entry explanations, empty for summarized schedules.
    pub fn explanations(&self) -> &[String] {
        match &self.explanation {
            Explanation::PerEntry(list) => list,
            Explanation::Summary(_) => &[],
        }
    }

    /// Day-level explanation, if this schedule carries one.
    pub fn summary(&self) -> Option<&str> {
        match &self.explanation {
            Explanation::Summary(text) => Some(text),
            Explanation::PerEntry(_) => None,
        }
    }

    /// Explanation for the entry at `index`, if any.
    pub fn explanation_for(&self, index: usize) -> Option<&str> {
        self.explanations().get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
