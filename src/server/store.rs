//! In-memory task store
//!
//! Tasks live for the lifetime of the process; there is no persistence.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::protocol::{Artifact, Task, TaskState, TaskStatus};

/// Error cancelling a task
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CancelError {
    /// No task with the given ID exists
    #[error("task not found")]
    NotFound,

    /// The task already reached a terminal state
    #[error("task is already {0:?}")]
    Terminal(TaskState),
}

/// Shared in-memory task map
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl TaskStore {
    /// Create a new empty task store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task, replacing any existing task with the same ID
    pub async fn insert(&self, task: Task) {
        self.tasks.write().await.insert(task.id.clone(), task);
    }

    /// Retrieve a task by ID
    pub async fn get(&self, task_id: &str) -> Option<Task> {
        self.tasks.read().await.get(task_id).cloned()
    }

    /// Number of stored tasks
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Apply a status transition and return the status now in effect
    ///
    /// Terminal states are sticky: a transition on an already-terminal task is
    /// ignored and the stored status is returned instead (a concurrent cancel
    /// wins over a late completion). Returns None if the task does not exist.
    pub async fn update_status(&self, task_id: &str, status: TaskStatus) -> Option<TaskStatus> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(task_id)?;

        if !task.status.state.is_terminal() {
            task.status = status;
        }
        Some(task.status.clone())
    }

    /// Append an artifact to a task
    pub async fn push_artifact(&self, task_id: &str, artifact: Artifact) {
        let mut tasks = self.tasks.write().await;
        if let Some(task) = tasks.get_mut(task_id) {
            task.artifacts.push(artifact);
        }
    }

    /// Cancel a non-terminal task and return it
    pub async fn cancel(&self, task_id: &str) -> Result<Task, CancelError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(task_id).ok_or(CancelError::NotFound)?;

        if task.status.state.is_terminal() {
            return Err(CancelError::Terminal(task.status.state));
        }

        task.status = TaskStatus::new(TaskState::Canceled);
        Ok(task.clone())
    }
}
