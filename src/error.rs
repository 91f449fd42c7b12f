//! Error types for dayflow
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// The one message a user ever sees when a submission does not produce a schedule.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to generate schedule. Please try again later.";

/// All error types that can occur in dayflow
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Request never produced a response (connect, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Planning service answered with a non-success status
    #[error("Planning service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the configured shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Missing or invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Submission attempted with no tasks
    #[error("No tasks to schedule")]
    EmptyTaskList,
}

impl PlannerError {
    /// Text shown to the user in place of this error.
    ///
    /// Every failure kind collapses to the same message; the detail is only logged.
    pub fn user_message(&self) -> &'static str {
        SUBMISSION_FAILED_MESSAGE
    }
}

/// Result type alias for dayflow operations
pub type Result<T> = std::result::Result<T, PlannerError>;
