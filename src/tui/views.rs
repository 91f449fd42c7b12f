//! TUI Views
//!
//! `render` draws the whole screen from the current `App` snapshot. Nothing in
//! here mutates state.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::app::{App, Focus};
use super::colors;
use crate::domain::{Explanation, Schedule, Task};
use crate::session::SubmissionState;

pub const TITLE: &str = "Daily Flow Optimizer";
pub const INPUT_PLACEHOLDER: &str = "Enter a task for today and press Enter";
pub const LOADING_TEXT: &str = "We're optimizing your day...";
pub const SCHEDULE_TITLE: &str = "Your Optimized Schedule";
pub const SUBMIT_LABEL: &str = "Optimize My Day";

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Draw the full screen
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_input(frame, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_tasks(frame, body[0], app);
    render_result(frame, body[1], app);
    render_footer(frame, chunks[3], app);

    if app.show_help() {
        render_help(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let status = match app.session().state() {
        SubmissionState::Idle => Span::styled("idle", Style::default().fg(colors::DIM)),
        SubmissionState::Submitting { .. } => Span::styled("planning", Style::default().fg(colors::PENDING)),
        SubmissionState::Success(_) => Span::styled("scheduled", Style::default().fg(colors::COMPLETE)),
        SubmissionState::Failure(_) => Span::styled("failed", Style::default().fg(colors::FAILED)),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", TITLE),
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::raw(format!("{} tasks │ ", app.session().editor().tasks().len())),
        status,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let pending = app.session().editor().pending();
    let focused = app.focus() == Focus::Input;

    let text = if pending.content().is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(colors::DIM)))
    } else {
        Line::from(pending.content())
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(" New task "),
    );
    frame.render_widget(input, area);

    if focused && !app.show_help() {
        // Clamp in usize; pending text has no length limit
        let last_col = area.width.saturating_sub(3) as usize;
        let col = pending.cursor_column().min(last_col) as u16;
        let x = area.x.saturating_add(1).saturating_add(col);
        frame.set_cursor_position((x, area.y.saturating_add(1)));
    }
}

fn render_tasks(frame: &mut Frame, area: Rect, app: &App) {
    let tasks = app.session().editor().tasks();
    let focused = app.focus() == Focus::Tasks;

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format_task(i, task, focused && app.selected() == Some(i)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(format!(" Tasks ({}) ", tasks.len())),
    );
    frame.render_widget(list, area);
}

fn format_task(index: usize, task: &Task, selected: bool) -> ListItem<'static> {
    let style = if selected {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(colors::DIM)),
        Span::raw(task.to_string()),
    ]);
    ListItem::new(line).style(style)
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL);

    let paragraph = match app.session().state() {
        SubmissionState::Idle => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Add your tasks, then press Ctrl+S to {}.", SUBMIT_LABEL.to_lowercase()),
                Style::default().fg(colors::DIM),
            )),
        ])
        .block(block.title(" Schedule ")),
        SubmissionState::Submitting { .. } => {
            let spinner = SPINNER[app.spinner_frame() % SPINNER.len()];
            Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("{} ", spinner), Style::default().fg(colors::PENDING)),
                    Span::styled("Planning...", Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(""),
                Line::from(LOADING_TEXT),
            ])
            .block(block.title(" Schedule "))
        }
        SubmissionState::Success(schedule) => {
            Paragraph::new(schedule_lines(schedule)).block(block.title(format!(" {} ", SCHEDULE_TITLE)))
        }
        SubmissionState::Failure(message) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), Style::default().fg(colors::FAILED))),
        ])
        .block(block.title(" Schedule ")),
    };

    frame.render_widget(paragraph.wrap(Wrap { trim: false }), area);
}

/// Lines for a schedule: time and task per entry, explanations under each or
/// one summary paragraph at the end.
pub fn schedule_lines(schedule: &Schedule) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, entry) in schedule.tasks().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}:", entry.time),
                Style::default().fg(colors::TIME).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}", entry.task)),
        ]));
        if let Some(why) = schedule.explanation_for(i) {
            lines.push(Line::from(Span::styled(
                format!("  {}", why),
                Style::default().fg(colors::DIM),
            )));
        }
    }

    if let Explanation::Summary(text) = schedule.explanation() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let submit_style = if app.session().can_submit() {
        Style::default().fg(colors::KEYBIND)
    } else {
        Style::default().fg(colors::DIM)
    };

    let mut spans = vec![
        Span::styled("^S", submit_style.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}  ", SUBMIT_LABEL), submit_style),
    ];

    let hints: &[(&str, &str)] = match app.focus() {
        Focus::Input => &[("Enter", "add"), ("Tab", "tasks"), ("^C", "quit")],
        Focus::Tasks => &[("j/k", "select"), ("d", "delete"), ("Tab", "type"), ("?", "help"), ("q", "quit")],
    };
    for (keys, action) in hints {
        spans.push(Span::styled(*keys, Style::default().fg(colors::KEYBIND)));
        spans.push(Span::raw(format!(" {}  ", action)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    let rows = [
        ("Enter", "Add the typed task"),
        ("Tab / Esc", "Switch between input and task list"),
        ("j / k, ↑ / ↓", "Select a task"),
        ("d / Del", "Delete the selected task"),
        ("s / Ctrl+S", "Optimize my day"),
        ("Ctrl+U", "Clear the input"),
        ("q / Ctrl+C", "Quit"),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", keys), Style::default().fg(colors::KEYBIND)),
                Span::raw(*action),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
        popup,
    );
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(colors::HEADER)
    } else {
        Style::default()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
