//! Submission session
//!
//! Owns the task editor and the submission state machine:
//!
//! ```text
//! Idle ──Started──▶ Submitting ──Succeeded──▶ Success(schedule)
//!   ▲                    │
//!   │                    └────Failed────▶ Failure(message)
//!   └──── (next Started clears either) ◀──────┘
//! ```
//!
//! `SubmissionState::apply` is the pure transition function. `PlannerSession`
//! adds the submit guard and request ids on top of it.

use log::{error, info, warn};

use crate::domain::{Schedule, Task};
use crate::editor::TaskEditor;
use crate::error::Result;
use crate::planner::PlannerClient;

/// Where the current submission stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Submitting { request_id: u64 },
    /// Latest request produced a schedule
    Success(Schedule),
    /// Latest request failed; holds the user-facing message
    Failure(String),
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    Started { request_id: u64 },
    Succeeded { request_id: u64, schedule: Schedule },
    Failed { request_id: u64, message: String },
}

impl SubmissionState {
    /// Next state after `event`.
    ///
    /// Outcomes only land while their own request is in flight; anything else
    /// leaves the state unchanged.
    pub fn apply(self, event: SubmissionEvent) -> SubmissionState {
        match (self, event) {
            (_, SubmissionEvent::Started { request_id }) => SubmissionState::Submitting { request_id },
            (SubmissionState::Submitting { request_id: current }, SubmissionEvent::Succeeded { request_id, schedule })
                if current == request_id =>
            {
                SubmissionState::Success(schedule)
            }
            (SubmissionState::Submitting { request_id: current }, SubmissionEvent::Failed { request_id, message })
                if current == request_id =>
            {
                SubmissionState::Failure(message)
            }
            (state, _) => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            SubmissionState::Success(schedule) => Some(schedule),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Id of the request in flight, if any
    pub fn in_flight(&self) -> Option<u64> {
        match self {
            SubmissionState::Submitting { request_id } => Some(*request_id),
            _ => None,
        }
    }
}

/// Everything needed to carry out one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub request_id: u64,
    pub tasks: Vec<Task>,
}

/// Task editor plus the submission state of the top-level UI
#[derive(Debug, Default)]
pub struct PlannerSession {
    editor: TaskEditor,
    state: SubmissionState,
    next_request_id: u64,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_editor(editor: TaskEditor) -> Self {
        Self {
            editor,
            ..Default::default()
        }
    }

    pub fn editor(&self) -> &TaskEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TaskEditor {
        &mut self.editor
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.state.schedule()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Whether a submission may start now.
    ///
    /// Used both to draw the submit affordance and to guard `begin_submit`.
    pub fn can_submit(&self) -> bool {
        !self.editor.tasks().is_empty() && !self.state.is_loading()
    }

    /// Enter `Submitting` and hand out the work for the request.
    ///
    /// Returns `None`, changing nothing, when `can_submit` is false.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.transition(SubmissionEvent::Started { request_id });

        let tasks = self.editor.tasks().as_slice().to_vec();
        info!("Submitting {} tasks (request {})", tasks.len(), request_id);
        Some(SubmitTicket { request_id, tasks })
    }

    /// Record the outcome of request `request_id`
    pub fn resolve(&mut self, request_id: u64, result: Result<Schedule>) {
        if self.state.in_flight() != Some(request_id) {
            warn!("Ignoring outcome of stale request {}", request_id);
            return;
        }

        let event = match result {
            Ok(schedule) => {
                info!("Request {} produced {} entries", request_id, schedule.len());
                SubmissionEvent::Succeeded { request_id, schedule }
            }
            Err(e) => {
                error!("Request {} failed: {}", request_id, e);
                SubmissionEvent::Failed {
                    request_id,
                    message: e.user_message().to_string(),
                }
            }
        };
        self.transition(event);
    }

    /// Run one full submission against `client`.
    ///
    /// Returns whether a request was issued.
    pub async fn submit_with(&mut self, client: &dyn PlannerClient) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let result = client.plan(&ticket.tasks).await;
        self.resolve(ticket.request_id, result);
        true
    }

    fn transition(&mut self, event: SubmissionEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }
}
