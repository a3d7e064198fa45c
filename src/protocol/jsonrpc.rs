//! JSON-RPC 2.0 envelopes for the A2A binding
//!
//! The agent serves its JSON-RPC endpoint at the advertised card URL; the
//! same envelope types are used by the client when calling remote agents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::message::Message;

/// A2A protocol method names
pub mod methods {
    /// Blocking message send, returns the completed task
    pub const MESSAGE_SEND: &str = "message/send";
    /// Streaming message send, returns SSE update events
    pub const MESSAGE_STREAM: &str = "message/stream";
    /// Retrieve a task by ID
    pub const TASKS_GET: &str = "tasks/get";
    /// Cancel a non-terminal task
    pub const TASKS_CANCEL: &str = "tasks/cancel";
}

/// JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
    /// A2A extension: the requested task does not exist
    pub const TASK_NOT_FOUND: i64 = -32001;
    /// A2A extension: the operation is not valid for the task's state
    pub const UNSUPPORTED_OPERATION: i64 = -32004;
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0"
    pub jsonrpc: String,

    /// Method name (see [`methods`])
    pub method: String,

    /// Method parameters
    #[serde(default)]
    pub params: Value,

    /// Request identifier, echoed in the response
    #[serde(default)]
    pub id: Value,
}

impl JsonRpcRequest {
    /// Create a request with a fresh UUID id
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id: Value::String(Uuid::now_v7().to_string()),
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always "2.0"
    pub jsonrpc: String,

    /// Result payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error object, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,

    /// Request identifier this responds to
    pub id: Value,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
            id,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,

    /// Human-readable error message
    pub message: String,

    /// Optional structured error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Parameters for `message/send` and `message/stream`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSendParams {
    /// The message to process
    pub message: Message,
}

/// Parameters for `tasks/get`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksGetParams {
    /// The task ID to retrieve
    #[serde(rename = "taskId", alias = "id")]
    pub task_id: String,
}

/// Parameters for `tasks/cancel`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksCancelParams {
    /// The task ID to cancel
    #[serde(rename = "taskId", alias = "id")]
    pub task_id: String,
}
