//! Schedule request/response adapter
//!
//! - `PlannerClient` trait: one task list in, one schedule out
//! - `HttpPlannerClient`: reqwest implementation against the remote service
//! - `MockPlannerClient`: queued replies for tests and offline runs
//! - `wire`: request encodings, response shapes, and the item fold

pub mod client;
pub mod http;
pub mod wire;

pub use client::{MockPlannerClient, PlannerClient};
pub use http::HttpPlannerClient;
pub use wire::{RequestEncoding, ResponseShape, ScheduleEntryDto, ScheduleItemDto, WireContract, fold_items};
