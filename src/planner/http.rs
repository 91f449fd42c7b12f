//! HTTP planner client
//!
//! POSTs the task list to `{base_url}{endpoint}` and decodes the body with the
//! configured [`WireContract`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::domain::{Schedule, Task};
use crate::error::{PlannerError, Result};
use crate::planner::client::PlannerClient;
use crate::planner::wire::WireContract;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Planner client backed by reqwest
pub struct HttpPlannerClient {
    client: Client,
    url: String,
    contract: WireContract,
}

impl HttpPlannerClient {
    /// Build a client from resolved API configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let base_url = config.resolve_base_url()?;
        Self::new(
            &base_url,
            &config.endpoint,
            config.contract(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// Create a client for an explicit base URL and endpoint
    pub fn new(base_url: &str, endpoint: &str, contract: WireContract, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlannerError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: join_url(base_url, endpoint),
            contract,
        })
    }

    /// Client with the default timeout
    pub fn with_contract(base_url: &str, endpoint: &str, contract: WireContract) -> Result<Self> {
        Self::new(base_url, endpoint, contract, DEFAULT_TIMEOUT)
    }

    pub fn contract(&self) -> WireContract {
        self.contract
    }

    /// Send a request body and return the raw response text
    async fn send_request(&self, body: &Value) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| PlannerError::Transport(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PlannerError::Status {
                status: status.as_u16(),
                body: error_body.trim().to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PlannerError::Transport(format!("Failed to read response: {}", e)))
    }
}

#[async_trait]
impl PlannerClient for HttpPlannerClient {
    async fn plan(&self, tasks: &[Task]) -> Result<Schedule> {
        if tasks.is_empty() {
            return Err(PlannerError::EmptyTaskList);
        }

        let body = self.contract.encode_request(tasks);
        info!("Requesting schedule for {} tasks from {}", tasks.len(), self.url);
        debug!("Request body: {}", body);

        let text = self.send_request(&body).await?;
        let schedule = self.contract.decode_response(&text)?;

        info!("Received schedule with {} entries", schedule.len());
        Ok(schedule)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpPlannerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPlannerClient")
            .field("url", &self.url)
            .field("contract", &self.contract)
            .finish()
    }
}

/// Join a base URL and an endpoint path with exactly one slash between them
fn join_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
