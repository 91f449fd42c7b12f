//! Task list editor
//!
//! Owns the ordered task list and the pending-input field. Every operation is
//! total: blank input and out-of-range indices are no-ops, never errors.

mod input;

pub use input::PendingInput;

use crate::domain::{Task, TaskList};
use log::debug;

/// Editable task list plus the text currently being typed
#[derive(Debug, Clone, Default)]
pub struct TaskEditor {
    tasks: TaskList,
    pending: PendingInput,
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor pre-filled with tasks, skipping blank ones.
    pub fn with_tasks<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut editor = Self::new();
        for text in texts {
            editor.add_text(text.as_ref());
        }
        editor
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingInput {
        &mut self.pending
    }

    /// Append the pending input as a task and clear it.
    ///
    /// Blank pending input is left exactly as it is. Returns whether a task was added.
    pub fn add_pending(&mut self) -> bool {
        match Task::parse(self.pending.content()) {
            Some(task) => {
                debug!("Adding task: {}", task);
                self.tasks.push(task);
                self.pending.clear();
                true
            }
            None => false,
        }
    }

    /// Append `text` as a task if it is not blank.
    pub fn add_text(&mut self, text: &str) -> bool {
        match Task::parse(text) {
            Some(task) => {
                debug!("Adding task: {}", task);
                self.tasks.push(task);
                true
            }
            None => false,
        }
    }

    /// Append every non-blank line of `text`, in order. Returns how many were added.
    ///
    /// Lines may end in `\n`, `\r\n` or a bare `\r`.
    pub fn add_lines(&mut self, text: &str) -> usize {
        text.split(['\n', '\r']).filter(|line| self.add_text(line)).count()
    }

    /// Remove the task at `index`; out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Task> {
        let removed = self.tasks.remove(index);
        if let Some(task) = &removed {
            debug!("Removed task {}: {}", index, task);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(editor: &mut TaskEditor, text: &str) {
        for c in text.chars() {
            editor.pending_mut().insert(c);
        }
    }

    #[test]
    fn test_add_pending_appends_and_clears() {
        let mut editor = TaskEditor::new();
        type_text(&mut editor, "Write report");
        assert!(editor.add_pending());
        type_text(&mut editor, "Call client");
        assert!(editor.add_pending());

        assert_eq!(editor.tasks().texts(), vec!["Write report", "Call client"]);
        assert_eq!(editor.pending().content(), "");
    }

    #[test]
    fn test_add_pending_trims() {
        let mut editor = TaskEditor::new();
        type_text(&mut editor, "   Mow the lawn  ");
        assert!(editor.add_pending());
        assert_eq!(editor.tasks().texts(), vec!["Mow the lawn"]);
    }

    #[test]
    fn test_add_pending_whitespace_is_noop() {
        let mut editor = TaskEditor::with_tasks(["A"]);
        type_text(&mut editor, "   ");

        assert!(!editor.add_pending());
        assert_eq!(editor.tasks().texts(), vec!["A"]);
        // Pending text is untouched, not cleared
        assert_eq!(editor.pending().content(), "   ");
    }

    #[test]
    fn test_add_pending_empty_is_noop() {
        let mut editor = TaskEditor::new();
        assert!(!editor.add_pending());
        assert!(editor.tasks().is_empty());
    }

    #[test]
    fn test_add_text_does_not_touch_pending() {
        let mut editor = TaskEditor::new();
        type_text(&mut editor, "draft");
        assert!(editor.add_text("Walk the dog"));
        assert_eq!(editor.pending().content(), "draft");
    }

    #[test]
    fn test_add_lines_skips_blank_lines() {
        let mut editor = TaskEditor::new();
        let added = editor.add_lines("Go for a run\n\n  Mow the lawn\n   \nHelp with science project\n");
        assert_eq!(added, 3);
        assert_eq!(
            editor.tasks().texts(),
            vec!["Go for a run", "Mow the lawn", "Help with science project"]
        );
    }

    #[test]
    fn test_add_lines_accepts_any_line_ending() {
        let mut editor = TaskEditor::new();
        let added = editor.add_lines("Go for a run\r\nMow the lawn\rCall client\n");
        assert_eq!(added, 3);
        assert_eq!(editor.tasks().texts(), vec!["Go for a run", "Mow the lawn", "Call client"]);
    }

    #[test]
    fn test_remove_by_index() {
        let mut editor = TaskEditor::with_tasks(["A", "B", "C"]);
        let removed = editor.remove(0).unwrap();
        assert_eq!(removed.as_str(), "A");
        assert_eq!(editor.tasks().texts(), vec!["B", "C"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut editor = TaskEditor::with_tasks(["A", "B", "C"]);
        assert!(editor.remove(3).is_none());
        assert_eq!(editor.tasks().texts(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_with_tasks_skips_blank() {
        let editor = TaskEditor::with_tasks(["", "x", " "]);
        assert_eq!(editor.tasks().texts(), vec!["x"]);
    }
}
