//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub mod agent;
pub mod error;
pub mod event;
pub mod jsonrpc;
pub mod message;
pub mod task;

pub use agent::{AgentCapabilities, AgentCard, AgentSkill};
pub use error::{A2AError, A2AResult};
pub use event::{TaskArtifactUpdateEvent, TaskStatusUpdateEvent, UpdateEvent};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use message::{Message, MessagePart, Role};
pub use task::{Task, TaskState, TaskStatus};

/// Artifacts represent task outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// Unique identifier of the Artifact
    #[serde(rename = "artifactId")]
    pub artifact_id: String,

    /// A human readable name for the Artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// A human readable description of the Artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Contents of the Artifact. Must contain at least one part
    pub parts: Vec<MessagePart>,

    /// Optional metadata for the Artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Artifact {
    /// Create a named artifact with a fresh UUID id
    pub fn new(name: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self::named(Uuid::now_v7().to_string(), name, parts)
    }

    /// Create a named artifact with an explicit id
    pub fn named(
        artifact_id: impl Into<String>,
        name: impl Into<String>,
        parts: Vec<MessagePart>,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            name: Some(name.into()),
            description: None,
            parts,
            metadata: None,
        }
    }

    /// Concatenated text content of the artifact
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                MessagePart::File { .. } | MessagePart::Data { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
