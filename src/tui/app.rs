//! TUI Application
//!
//! Owns the planner session plus view-only state (focus, selection, help,
//! spinner) and turns key presses into session operations.

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;

use super::input::{edit_pending, is_force_quit, is_submit_shortcut};
use crate::editor::TaskEditor;
use crate::session::{PlannerSession, SubmitTicket};

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing a new task
    #[default]
    Input,
    /// Navigating the task list
    Tasks,
}

/// Main TUI application state
#[derive(Debug, Default)]
pub struct App {
    session: PlannerSession,
    focus: Focus,
    selected: Option<usize>,
    show_help: bool,
    spinner_frame: usize,
    should_quit: bool,
    /// Submission started by a key press, waiting for the runner to send it
    pending_submit: Option<SubmitTicket>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// App pre-filled with tasks
    pub fn with_editor(editor: TaskEditor) -> Self {
        Self {
            session: PlannerSession::with_editor(editor),
            ..Default::default()
        }
    }

    pub fn session(&self) -> &PlannerSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlannerSession {
        &mut self.session
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Hand the started submission to the runner
    pub fn take_pending_submit(&mut self) -> Option<SubmitTicket> {
        self.pending_submit.take()
    }

    /// Advance the loading animation
    pub fn on_tick(&mut self) {
        if self.session.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if is_force_quit(&key) {
            self.quit();
            return true;
        }

        if self.show_help {
            self.show_help = false;
            return false;
        }

        if is_submit_shortcut(&key) {
            self.submit();
            return false;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Tasks => self.handle_tasks_key(key),
        }

        self.should_quit
    }

    /// Handle pasted text: several lines become several tasks, one line is typed in.
    pub fn handle_paste(&mut self, text: &str) {
        // Some terminals deliver pasted line breaks as bare `\r`
        if text.contains(['\n', '\r']) {
            let added = self.session.editor_mut().add_lines(text);
            debug!("Pasted {} tasks", added);
        } else {
            self.session.editor_mut().pending_mut().insert_str(text);
            self.focus = Focus::Input;
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.session.editor_mut().add_pending();
            }
            KeyCode::Tab | KeyCode::Esc => self.set_focus(Focus::Tasks),
            _ => {
                edit_pending(self.session.editor_mut().pending_mut(), &key);
            }
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('a') => self.set_focus(Focus::Input),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => self.remove_selected(),
            KeyCode::Char('s') | KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if focus == Focus::Tasks && self.selected.is_none() && !self.session.editor().tasks().is_empty() {
            self.selected = Some(0);
        }
    }

    /// Start a submission if the guard allows it
    pub fn submit(&mut self) {
        if let Some(ticket) = self.session.begin_submit() {
            self.spinner_frame = 0;
            self.pending_submit = Some(ticket);
        } else {
            debug!("Submit ignored: nothing to submit or request already in flight");
        }
    }

    pub fn select_next(&mut self) {
        let len = self.session.editor().tasks().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
        });
    }

    pub fn select_prev(&mut self) {
        let len = self.session.editor().tasks().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Delete the selected task and keep the selection in range
    pub fn remove_selected(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        self.session.editor_mut().remove(index);

        let len = self.session.editor().tasks().len();
        self.selected = if len == 0 { None } else { Some(index.min(len - 1)) };
    }
}
