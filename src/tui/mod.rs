//! Terminal User Interface for dayflow.
//!
//! One screen: task input on top, the task list on the left, the schedule (or
//! loading indicator, or error) on the right.

mod app;
mod events;
mod input;
mod runner;
mod views;

pub use app::{App, Focus};
pub use events::{Event, EventHandler};
pub use runner::{Completions, TuiRunner};
pub use views::render;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use log::{error, info};
use ratatui::prelude::*;
use std::io::{Stdout, stdout};
use std::sync::Arc;

use crate::config::Config;
use crate::editor::TaskEditor;
use crate::planner::PlannerClient;

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode, bracketed paste, and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    stdout().execute(DisableBracketedPaste)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the interactive planner until the user quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run(config: &Config, client: Arc<dyn PlannerClient>, editor: TaskEditor) -> Result<()> {
    info!("Launching TUI");
    install_panic_hook();
    let terminal = init_terminal()?;
    let mut runner = TuiRunner::new(terminal, App::with_editor(editor), client, config.tui.tick_rate_ms);

    let result = runner.run().await;
    finish(result, restore_terminal())
}

/// Combine the loop outcome with the restore outcome; the loop's error wins.
fn finish(result: Result<()>, restore: Result<()>) -> Result<()> {
    match (result, restore) {
        (Err(e), Err(restore_err)) => {
            error!("Failed to restore terminal: {}", restore_err);
            Err(e)
        }
        (result, restore) => result.and(restore),
    }
}

/// Restore the terminal before the default panic message is printed
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(e) = restore_terminal() {
            error!("Failed to restore terminal after panic: {}", e);
        }
        default_hook(info);
    }));
}

/// Status colors inspired by k9s.
pub mod colors {
    use ratatui::style::Color;

    pub const PENDING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const COMPLETE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const TIME: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const DIM: Color = Color::DarkGray;
}
