//! App flow integration tests
//!
//! Drives the TUI app with key presses against a mock planner client, the way
//! the event loop does, without a terminal.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dayflow::domain::{Schedule, ScheduleEntry};
use dayflow::error::SUBMISSION_FAILED_MESSAGE;
use dayflow::planner::{MockPlannerClient, PlannerClient};
use dayflow::tui::{App, Completions, Focus};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_task(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
}

async fn settle(completions: &mut Completions, app: &mut App) {
    for _ in 0..50 {
        if completions.drain_into(app) > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("submission never completed");
}

fn run_schedule() -> Schedule {
    Schedule::from_explained(vec![
        (ScheduleEntry::new("07:00", "Go for a run"), "Energy for the day".to_string()),
        (ScheduleEntry::new("09:00", "Write report"), "Focus peaks early".to_string()),
    ])
}

#[tokio::test]
async fn test_type_submit_and_show_schedule() {
    let mock = Arc::new(MockPlannerClient::with_schedule(run_schedule()));
    let client: Arc<dyn PlannerClient> = mock.clone();
    let mut app = App::new();
    let mut completions = Completions::new();

    assert_eq!(app.focus(), Focus::Input);
    type_task(&mut app, "Go for a run");
    type_task(&mut app, "   ");
    type_task(&mut app, "Write report");
    assert_eq!(app.session().editor().tasks().texts(), vec!["Go for a run", "Write report"]);

    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(app.session().is_loading());

    // A second submit while loading is refused
    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

    let ticket = app.take_pending_submit().expect("submission should start");
    completions.spawn(client, ticket);
    assert!(app.take_pending_submit().is_none());

    settle(&mut completions, &mut app).await;

    assert_eq!(app.session().schedule(), Some(&run_schedule()));
    assert_eq!(mock.call_count(), 1);
    let sent: Vec<String> = mock.calls()[0].iter().map(|t| t.to_string()).collect();
    assert_eq!(sent, vec!["Go for a run", "Write report"]);
}

#[tokio::test]
async fn test_failure_then_retry() {
    let mock = Arc::new(MockPlannerClient::failing("service down"));
    mock.push_schedule(run_schedule());
    let client: Arc<dyn PlannerClient> = mock.clone();

    let mut app = App::new();
    let mut completions = Completions::new();
    type_task(&mut app, "Write report");

    app.submit();
    completions.spawn(client.clone(), app.take_pending_submit().unwrap());
    settle(&mut completions, &mut app).await;

    assert_eq!(app.session().error(), Some(SUBMISSION_FAILED_MESSAGE));
    assert!(app.session().schedule().is_none());
    assert_eq!(app.session().editor().tasks().len(), 1);

    app.submit();
    assert!(app.session().error().is_none());
    completions.spawn(client, app.take_pending_submit().unwrap());
    settle(&mut completions, &mut app).await;

    assert!(app.session().schedule().is_some());
}

#[test]
fn test_remove_task_from_list() {
    let mut app = App::new();
    type_task(&mut app, "Write report");
    type_task(&mut app, "Buy groceries");

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus(), Focus::Tasks);
    assert_eq!(app.selected(), Some(0));

    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.session().editor().tasks().texts(), vec!["Buy groceries"]);
}

#[test]
fn test_submit_with_empty_list_is_ignored() {
    let mut app = App::new();
    app.submit();
    assert!(app.take_pending_submit().is_none());
    assert!(!app.session().is_loading());
}

#[test]
fn test_multiline_paste_adds_tasks() {
    let mut app = App::new();
    app.handle_paste("Write report\n\nCall client\n");
    assert_eq!(app.session().editor().tasks().texts(), vec!["Write report", "Call client"]);
}
