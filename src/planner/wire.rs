//! Wire format for the planning service
//!
//! The service has shipped three contracts. Which one a deployment speaks is
//! configuration, so both halves are selectable independently:
//!
//! | encoding         | body                                  |
//! |------------------|---------------------------------------|
//! | `newline-joined` | `{"tasks": "a\nb"}`                   |
//! | `json-array`     | `{"tasks": ["a", "b"]}`               |
//!
//! | shape      | body                                                  |
//! |------------|-------------------------------------------------------|
//! | `schedule` | `{"schedule": [{"time", "task", "explanation"}]}`     |
//! | `items`    | `{"items": [{"time", "task", "explanation"}]}`        |
//! | `flat`     | `{"explanation": "...", "tasks": [{"time", "task"}]}` |

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

use crate::domain::{Schedule, ScheduleEntry, Task};
use crate::error::{PlannerError, Result};

/// How the task list is placed in the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RequestEncoding {
    /// One string, tasks separated by `\n`
    NewlineJoined,
    /// Array of strings
    #[default]
    JsonArray,
}

/// Which envelope the response body uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseShape {
    /// `{ schedule: [{time, task, explanation}] }`
    Schedule,
    /// `{ items: [{time, task, explanation}] }`
    Items,
    /// `{ explanation, tasks: [{time, task}] }`
    #[default]
    Flat,
}

impl fmt::Display for RequestEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestEncoding::NewlineJoined => write!(f, "newline-joined"),
            RequestEncoding::JsonArray => write!(f, "json-array"),
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseShape::Schedule => write!(f, "schedule"),
            ResponseShape::Items => write!(f, "items"),
            ResponseShape::Flat => write!(f, "flat"),
        }
    }
}

/// Request and response halves of one service contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireContract {
    pub request: RequestEncoding,
    pub response: ResponseShape,
}

impl WireContract {
    pub fn new(request: RequestEncoding, response: ResponseShape) -> Self {
        Self { request, response }
    }

    /// Build the JSON request body for `tasks`
    pub fn encode_request(&self, tasks: &[Task]) -> Value {
        match self.request {
            RequestEncoding::NewlineJoined => {
                let joined = tasks.iter().map(Task::as_str).collect::<Vec<_>>().join("\n");
                json!({ "tasks": joined })
            }
            RequestEncoding::JsonArray => {
                let list: Vec<&str> = tasks.iter().map(Task::as_str).collect();
                json!({ "tasks": list })
            }
        }
    }

    /// Decode a response body into a schedule
    pub fn decode_response(&self, body: &str) -> Result<Schedule> {
        let decode_err = |e: serde_json::Error| PlannerError::Decode(format!("{} response: {}", self.response, e));

        match self.response {
            ResponseShape::Schedule => {
                let envelope: ScheduleEnvelope = serde_json::from_str(body).map_err(decode_err)?;
                Ok(fold_items(envelope.schedule))
            }
            ResponseShape::Items => {
                let envelope: ItemsEnvelope = serde_json::from_str(body).map_err(decode_err)?;
                Ok(fold_items(envelope.items))
            }
            ResponseShape::Flat => {
                let envelope: FlatEnvelope = serde_json::from_str(body).map_err(decode_err)?;
                let entries = envelope.tasks.into_iter().map(ScheduleEntry::from).collect();
                Ok(Schedule::summarized(entries, envelope.explanation))
            }
        }
    }
}

/// Item carrying its own explanation (`schedule` and `items` shapes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItemDto {
    pub time: String,
    pub task: String,
    pub explanation: String,
}

/// Bare `{time, task}` item (`flat` shape)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntryDto {
    pub time: String,
    pub task: String,
}

impl From<ScheduleEntryDto> for ScheduleEntry {
    fn from(dto: ScheduleEntryDto) -> Self {
        ScheduleEntry::new(dto.time, dto.task)
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleEnvelope {
    schedule: Vec<ScheduleItemDto>,
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    items: Vec<ScheduleItemDto>,
}

#[derive(Debug, Deserialize)]
struct FlatEnvelope {
    explanation: String,
    tasks: Vec<ScheduleEntryDto>,
}

/// Split explained items into aligned entries and explanations.
pub fn fold_items(items: Vec<ScheduleItemDto>) -> Schedule {
    Schedule::from_explained(
        items
            .into_iter()
            .map(|item| (ScheduleEntry::new(item.time, item.task), item.explanation)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Explanation;

    fn tasks(texts: &[&str]) -> Vec<Task> {
        texts.iter().filter_map(|t| Task::parse(t)).collect()
    }

    #[test]
    fn test_encode_newline_joined() {
        let contract = WireContract::new(RequestEncoding::NewlineJoined, ResponseShape::Items);
        let body = contract.encode_request(&tasks(&["Write report", "Call client"]));
        assert_eq!(body, json!({ "tasks": "Write report\nCall client" }));
    }

    #[test]
    fn test_encode_json_array() {
        let contract = WireContract::new(RequestEncoding::JsonArray, ResponseShape::Flat);
        let body = contract.encode_request(&tasks(&["Write report", "Call client"]));
        assert_eq!(body, json!({ "tasks": ["Write report", "Call client"] }));
    }

    #[test]
    fn test_decode_items_folds_into_parallel_sequences() {
        let contract = WireContract::new(RequestEncoding::NewlineJoined, ResponseShape::Items);
        let body = r#"{"items":[{"time":"09:00","task":"Write report","explanation":"Mornings are best for focus work"}]}"#;

        let schedule = contract.decode_response(body).unwrap();

        assert_eq!(schedule.explanations(), &["Mornings are best for focus work".to_string()]);
        assert_eq!(schedule.tasks(), &[ScheduleEntry::new("09:00", "Write report")]);
    }

    #[test]
    fn test_decode_items_preserves_order() {
        let contract = WireContract::new(RequestEncoding::NewlineJoined, ResponseShape::Items);
        let body = json!({
            "items": [
                { "time": "7:00 AM", "task": "Go for a 20-minute run", "explanation": "energy" },
                { "time": "8:00 AM", "task": "Mow the lawn", "explanation": "cool morning" },
                { "time": "3:00 PM", "task": "Help daughter with science project", "explanation": "free afternoon" }
            ]
        })
        .to_string();

        let schedule = contract.decode_response(&body).unwrap();

        let times: Vec<&str> = schedule.tasks().iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, vec!["7:00 AM", "8:00 AM", "3:00 PM"]);
        assert_eq!(schedule.explanations(), &["energy", "cool morning", "free afternoon"]);
    }

    #[test]
    fn test_decode_schedule_shape() {
        let contract = WireContract::new(RequestEncoding::NewlineJoined, ResponseShape::Schedule);
        let body = r#"{"schedule":[{"time":"10:00 AM","task":"Prepare for meeting","explanation":"focused"}]}"#;

        let schedule = contract.decode_response(body).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.explanation_for(0), Some("focused"));
    }

    #[test]
    fn test_decode_flat_shape() {
        let contract = WireContract::default();
        let body = r#"{"explanation":"Deep work early.","tasks":[{"time":"09:00","task":"Write report"},{"time":"11:00","task":"Call client"}]}"#;

        let schedule = contract.decode_response(body).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.explanation(), &Explanation::Summary("Deep work early.".to_string()));
    }

    #[test]
    fn test_decode_wrong_shape_is_error() {
        let contract = WireContract::new(RequestEncoding::JsonArray, ResponseShape::Items);
        let body = r#"{"explanation":"x","tasks":[]}"#;

        let err = contract.decode_response(body).unwrap_err();
        assert!(matches!(err, PlannerError::Decode(_)));
        assert!(err.to_string().contains("items response"));
    }

    #[test]
    fn test_decode_malformed_json_is_error() {
        let contract = WireContract::default();
        assert!(matches!(
            contract.decode_response("not json"),
            Err(PlannerError::Decode(_))
        ));
    }

    #[test]
    fn test_default_contract_is_latest() {
        let contract = WireContract::default();
        assert_eq!(contract.request, RequestEncoding::JsonArray);
        assert_eq!(contract.response, ResponseShape::Flat);
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(
            serde_json::to_string(&RequestEncoding::NewlineJoined).unwrap(),
            "\"newline-joined\""
        );
        assert_eq!(serde_json::to_string(&ResponseShape::Items).unwrap(), "\"items\"");
        assert_eq!(RequestEncoding::JsonArray.to_string(), "json-array");
        assert_eq!(ResponseShape::Schedule.to_string(), "schedule");
    }
}
