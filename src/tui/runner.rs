//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, and event handler. It runs the
//! main loop: render → handle events → start submissions → collect results → repeat.
//!
//! Submissions run as spawned tasks so the screen keeps redrawing while a
//! request is outstanding. Each task reports back over a channel that is
//! drained once per loop iteration.

use std::sync::Arc;

use eyre::Result;
use log::info;
use tokio::sync::mpsc;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;
use crate::domain::Schedule;
use crate::error;
use crate::planner::PlannerClient;
use crate::session::SubmitTicket;

/// Outcome of one spawned submission
type Completion = (u64, error::Result<Schedule>);

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
    client: Arc<dyn PlannerClient>,
    completions: Completions,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, client: Arc<dyn PlannerClient>, tick_rate_ms: u64) -> Self {
        Self {
            terminal,
            app,
            event_handler: EventHandler::new(tick_rate_ms),
            client,
            completions: Completions::new(),
        }
    }

    /// Run the main TUI loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop against {}", self.client.endpoint());

        loop {
            // 1. Render current state
            self.terminal.draw(|f| render(f, &self.app))?;

            // 2. Handle events (keyboard, paste, tick)
            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Paste(text) => self.app.handle_paste(&text),
                Event::Tick => self.app.on_tick(),
                Event::Resize(_, _) => {
                    // Picked up on next draw
                }
            }

            // 3. Start any submission the keys asked for
            if let Some(ticket) = self.app.take_pending_submit() {
                self.completions.spawn(Arc::clone(&self.client), ticket);
            }

            // 4. Apply finished submissions
            self.completions.drain_into(&mut self.app);

            if self.app.should_quit() {
                break;
            }
        }

        info!("TUI main loop ended");
        Ok(())
    }
}

/// Channel between spawned submissions and the event loop
pub struct Completions {
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Completions {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Run `ticket` against `client` on the runtime
    pub fn spawn(&self, client: Arc<dyn PlannerClient>, ticket: SubmitTicket) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.plan(&ticket.tasks).await;
            // Receiver only goes away when the TUI is shutting down
            let _ = tx.send((ticket.request_id, result));
        });
    }

    /// Resolve every finished submission into the app's session
    pub fn drain_into(&mut self, app: &mut App) -> usize {
        let mut applied = 0;
        while let Ok((request_id, result)) = self.rx.try_recv() {
            app.session_mut().resolve(request_id, result);
            applied += 1;
        }
        applied
    }
}

impl Default for Completions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScheduleEntry;
    use crate::editor::TaskEditor;
    use crate::planner::MockPlannerClient;
    use std::time::Duration;

    async fn wait_for_completion(completions: &mut Completions, app: &mut App) {
        for _ in 0..50 {
            if completions.drain_into(app) > 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("submission never completed");
    }

    #[tokio::test]
    async fn test_spawned_submission_resolves_session() {
        let schedule = Schedule::summarized(vec![ScheduleEntry::new("09:00", "Write report")], "ok");
        let client: Arc<dyn PlannerClient> = Arc::new(MockPlannerClient::with_schedule(schedule.clone()));
        let mut app = App::with_editor(TaskEditor::with_tasks(["Write report"]));
        let mut completions = Completions::new();

        app.submit();
        let ticket = app.take_pending_submit().unwrap();
        completions.spawn(client, ticket);
        assert!(app.session().is_loading());

        wait_for_completion(&mut completions, &mut app).await;
        assert_eq!(app.session().schedule(), Some(&schedule));
        assert!(!app.session().is_loading());
    }

    #[tokio::test]
    async fn test_spawned_failure_becomes_error_state() {
        let client: Arc<dyn PlannerClient> = Arc::new(MockPlannerClient::failing("offline"));
        let mut app = App::with_editor(TaskEditor::with_tasks(["Write report"]));
        let mut completions = Completions::new();

        app.submit();
        completions.spawn(client, app.take_pending_submit().unwrap());

        wait_for_completion(&mut completions, &mut app).await;
        assert!(app.session().error().is_some());
        assert!(app.session().schedule().is_none());
        assert!(!app.session().is_loading());
    }

    #[test]
    fn test_drain_with_nothing_pending() {
        let mut completions = Completions::new();
        let mut app = App::new();
        assert_eq!(completions.drain_into(&mut app), 0);
    }
}
