//! Streaming task update events
//!
//! Events emitted over the `message/stream` SSE channel. Each event is tagged
//! with a `kind` field so consumers can dispatch without sniffing payloads.

use serde::{Deserialize, Serialize};

use super::{task::TaskStatus, Artifact};

/// A task update emitted while a turn is being processed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum UpdateEvent {
    /// Status transition for a task
    #[serde(rename = "status-update")]
    StatusUpdate(TaskStatusUpdateEvent),

    /// Artifact produced for a task
    #[serde(rename = "artifact-update")]
    ArtifactUpdate(TaskArtifactUpdateEvent),
}

impl UpdateEvent {
    /// Task ID this event belongs to
    pub fn task_id(&self) -> &str {
        match self {
            UpdateEvent::StatusUpdate(event) => &event.task_id,
            UpdateEvent::ArtifactUpdate(event) => &event.task_id,
        }
    }

    /// Whether this event closes the stream
    pub fn is_final(&self) -> bool {
        match self {
            UpdateEvent::StatusUpdate(event) => event.is_final,
            UpdateEvent::ArtifactUpdate(_) => false,
        }
    }
}

/// Status transition event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatusUpdateEvent {
    /// Task the status belongs to
    #[serde(rename = "taskId")]
    pub task_id: String,

    /// Context the task belongs to
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// The new status
    pub status: TaskStatus,

    /// Whether this is the last event of the stream
    #[serde(rename = "final", default)]
    pub is_final: bool,
}

/// Artifact production event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskArtifactUpdateEvent {
    /// Task the artifact belongs to
    #[serde(rename = "taskId")]
    pub task_id: String,

    /// Context the task belongs to
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// The produced artifact
    pub artifact: Artifact,

    /// Whether the artifact is complete
    #[serde(rename = "lastChunk", default)]
    pub last_chunk: bool,
}
