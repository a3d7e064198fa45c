//! High-level A2A agent client
//!
//! A thin JSON-RPC client used by the demonstration script and integration
//! callers: discover the agent card, send messages (blocking or streaming),
//! and inspect or cancel tasks.

mod sse;

pub use sse::parse_update_stream;

use std::time::Duration;

use futures::stream::Stream;
use serde_json::Value;
use url::Url;

use crate::protocol::{
    jsonrpc::{methods, MessageSendParams, TasksCancelParams, TasksGetParams},
    A2AError, AgentCard, JsonRpcRequest, JsonRpcResponse, Message, Task, UpdateEvent,
};

/// Path the agent card is served under
const AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";

/// Client for a remote A2A agent
///
/// # Example
///
/// ```rust,no_run
/// use a2a_qa_agent::client::AgentClient;
/// use a2a_qa_agent::protocol::Message;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AgentClient::new("http://127.0.0.1:9009".parse()?);
///
/// let card = client.discover().await?;
/// println!("Connected to: {}", card.name);
///
/// let task = client.send_message(Message::user("Hello, agent!")).await?;
/// println!("Task {} finished as {:?}", task.id, task.status.state);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl AgentClient {
    /// Create a client for the agent at the given base URL
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the remote agent
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the agent card from `/.well-known/agent-card.json`
    pub async fn discover(&self) -> Result<AgentCard, A2AError> {
        let url = self
            .base_url
            .join(AGENT_CARD_PATH)
            .map_err(|e| A2AError::Validation(format!("Invalid agent URL: {}", e)))?;

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(A2AError::Transport(format!(
                "Agent card request failed with status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Send a message and wait for the finished task
    pub async fn send_message(&self, message: Message) -> Result<Task, A2AError> {
        let params = serde_json::to_value(MessageSendParams { message })?;
        let result = self.call(methods::MESSAGE_SEND, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Send a message and stream task update events as they happen
    ///
    /// The stream ends after the final status event.
    pub async fn send_message_streaming(
        &self,
        message: Message,
    ) -> Result<impl Stream<Item = Result<UpdateEvent, A2AError>>, A2AError> {
        let params = serde_json::to_value(MessageSendParams { message })?;
        let request = JsonRpcRequest::new(methods::MESSAGE_STREAM, params);

        let response = self
            .http
            .post(self.base_url.clone())
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::Transport(format!(
                "Streaming request failed with status {}: {}",
                status, body
            )));
        }

        Ok(parse_update_stream(response.bytes_stream()))
    }

    /// Get a task by ID
    pub async fn get_task(&self, task_id: impl Into<String>) -> Result<Task, A2AError> {
        let params = serde_json::to_value(TasksGetParams {
            task_id: task_id.into(),
        })?;
        let result = self.call(methods::TASKS_GET, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Cancel a task by ID
    pub async fn cancel_task(&self, task_id: impl Into<String>) -> Result<Task, A2AError> {
        let params = serde_json::to_value(TasksCancelParams {
            task_id: task_id.into(),
        })?;
        let result = self.call(methods::TASKS_CANCEL, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Issue one JSON-RPC call and unwrap the result payload
    async fn call(&self, method: &str, params: Value) -> Result<Value, A2AError> {
        let request = JsonRpcRequest::new(method, params);

        let response = self
            .http
            .post(self.base_url.clone())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(A2AError::Transport(format!(
                "HTTP request failed with status {}",
                response.status()
            )));
        }

        let envelope: JsonRpcResponse = response.json().await?;

        if let Some(error) = envelope.error {
            return Err(A2AError::Protocol(format!(
                "JSON-RPC error {}: {}",
                error.code, error.message
            )));
        }

        envelope
            .result
            .ok_or_else(|| A2AError::Protocol("JSON-RPC response missing 'result' field".into()))
    }
}
