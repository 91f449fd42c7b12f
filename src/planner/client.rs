//! Planner client trait and an in-memory implementation

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Schedule, Task};
use crate::error::{PlannerError, Result};

/// Sends one task list to a planning service and returns its schedule.
///
/// Each call is exactly one request: no retry, no backoff.
#[async_trait]
pub trait PlannerClient: Send + Sync {
    /// Request a schedule for `tasks`
    async fn plan(&self, tasks: &[Task]) -> Result<Schedule>;

    /// Where requests go, for display and logging
    fn endpoint(&self) -> &str;
}

/// Client that replays queued replies and records every call
#[derive(Debug, Default)]
pub struct MockPlannerClient {
    replies: Mutex<VecDeque<std::result::Result<Schedule, String>>>,
    calls: Mutex<Vec<Vec<Task>>>,
}

impl MockPlannerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose first call succeeds with `schedule`
    pub fn with_schedule(schedule: Schedule) -> Self {
        let mock = Self::new();
        mock.push_schedule(schedule);
        mock
    }

    /// Mock whose first call fails with a transport error
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_failure(message);
        mock
    }

    pub fn push_schedule(&self, schedule: Schedule) {
        self.lock_replies().push_back(Ok(schedule));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.lock_replies().push_back(Err(message.into()));
    }

    /// Number of `plan` calls so far
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Task lists received, in call order
    pub fn calls(&self) -> Vec<Vec<Task>> {
        self.lock_calls().clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<std::result::Result<Schedule, String>>> {
        self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<Vec<Task>>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PlannerClient for MockPlannerClient {
    async fn plan(&self, tasks: &[Task]) -> Result<Schedule> {
        if tasks.is_empty() {
            return Err(PlannerError::EmptyTaskList);
        }
        self.lock_calls().push(tasks.to_vec());

        match self.lock_replies().pop_front() {
            Some(Ok(schedule)) => Ok(schedule),
            Some(Err(message)) => Err(PlannerError::Transport(message)),
            None => Err(PlannerError::Transport("no reply queued".to_string())),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://planner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScheduleEntry;

    fn tasks(texts: &[&str]) -> Vec<Task> {
        texts.iter().filter_map(|t| Task::parse(t)).collect()
    }

    #[tokio::test]
    async fn test_mock_returns_queued_schedule() {
        let schedule = Schedule::summarized(vec![ScheduleEntry::new("09:00", "Write report")], "ok");
        let mock = MockPlannerClient::with_schedule(schedule.clone());

        let result = mock.plan(&tasks(&["Write report"])).await.unwrap();
        assert_eq!(result, schedule);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0][0].as_str(), "Write report");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockPlannerClient::failing("connection refused");
        let err = mock.plan(&tasks(&["A"])).await.unwrap_err();
        assert!(matches!(err, PlannerError::Transport(ref m) if m == "connection refused"));
    }

    #[tokio::test]
    async fn test_mock_exhausted_queue_fails() {
        let mock = MockPlannerClient::new();
        assert!(mock.plan(&tasks(&["A"])).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_rejects_empty_list_without_recording() {
        let mock = MockPlannerClient::with_schedule(Schedule::from_explained(Vec::new()));
        let err = mock.plan(&[]).await.unwrap_err();
        assert!(matches!(err, PlannerError::EmptyTaskList));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockPlannerClient>();
    }
}
