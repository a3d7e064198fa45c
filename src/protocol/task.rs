//! A2A task types and lifecycle management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{message::Message, Artifact};

/// A task in the A2A protocol
///
/// Tasks represent one conversational turn handled by the agent. They carry a
/// status that moves through the lifecycle, the artifacts produced by the
/// turn, and the message history that created them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Context ID grouping related tasks/messages
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Current status of the task
    pub status: TaskStatus,

    /// Artifacts produced by the turn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,

    /// Messages that fed this task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,
}

impl Task {
    /// Create a new task in the submitted state
    pub fn new(id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context_id: Some(context_id.into()),
            status: TaskStatus::submitted(),
            artifacts: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Check if the task is still processing
    pub fn is_processing(&self) -> bool {
        matches!(self.status.state, TaskState::Submitted | TaskState::Working)
    }

    /// Record a status transition
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Append an artifact to the task
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Append a message to the task history
    pub fn with_history_message(mut self, message: Message) -> Self {
        self.history.push(message);
        self
    }
}

/// Status of a task: the lifecycle state plus an optional agent message and a
/// timestamp of the transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Lifecycle state
    pub state: TaskState,

    /// Optional agent message accompanying the transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// When the transition happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TaskStatus {
    /// Create a status for the given state, stamped now
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a submitted status
    pub fn submitted() -> Self {
        Self::new(TaskState::Submitted)
    }

    /// Attach an agent message to the status
    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }
}

/// Task state in the A2A protocol lifecycle
///
/// Task lifecycle: submitted → working → completed/failed/canceled/rejected
/// Non-terminal holding state: input-required (awaiting client input)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task requires additional input from the client
    InputRequired,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,

    /// Task was canceled by the client
    Canceled,

    /// Task was rejected by the agent (e.g., invalid request)
    Rejected,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled | TaskState::Rejected
        )
    }
}
