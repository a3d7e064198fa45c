//! Per-turn task update reporter
//!
//! A [`TaskUpdater`] is handed to the executor for each turn. Every report is
//! applied to the shared store and, when a streaming subscriber is attached,
//! forwarded as an update event. Sends to a disconnected subscriber are
//! dropped: a client going away does not abort the turn.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::protocol::{
    Artifact, Message, MessagePart, TaskArtifactUpdateEvent, TaskState, TaskStatus,
    TaskStatusUpdateEvent, UpdateEvent,
};

use super::store::TaskStore;

/// Reports status transitions and artifacts for one task
#[derive(Clone)]
pub struct TaskUpdater {
    task_id: String,
    context_id: String,
    store: Arc<TaskStore>,
    subscriber: Option<mpsc::UnboundedSender<UpdateEvent>>,
}

impl TaskUpdater {
    /// Create an updater for the given task
    pub fn new(
        store: Arc<TaskStore>,
        task_id: impl Into<String>,
        context_id: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            context_id: context_id.into(),
            store,
            subscriber: None,
        }
    }

    /// Attach a streaming subscriber receiving every update event
    pub fn with_subscriber(mut self, subscriber: mpsc::UnboundedSender<UpdateEvent>) -> Self {
        self.subscriber = Some(subscriber);
        self
    }

    /// The task this updater reports on
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Report a status transition, optionally carrying an agent message
    pub async fn update_status(&self, state: TaskState, message: Option<Message>) {
        let message = message.map(|message| self.stamp(message));
        let mut status = TaskStatus::new(state);
        if let Some(message) = message {
            status = status.with_message(message);
        }

        let applied = self
            .store
            .update_status(&self.task_id, status)
            .await
            .unwrap_or_else(|| TaskStatus::new(state));

        self.emit(UpdateEvent::StatusUpdate(TaskStatusUpdateEvent {
            task_id: self.task_id.clone(),
            context_id: Some(self.context_id.clone()),
            is_final: applied.state.is_terminal(),
            status: applied,
        }));
    }

    /// Report a named artifact produced for this task
    pub async fn add_artifact(&self, parts: Vec<MessagePart>, name: &str) {
        let artifact = Artifact::new(name, parts);
        self.store.push_artifact(&self.task_id, artifact.clone()).await;

        self.emit(UpdateEvent::ArtifactUpdate(TaskArtifactUpdateEvent {
            task_id: self.task_id.clone(),
            context_id: Some(self.context_id.clone()),
            artifact,
            last_chunk: true,
        }));
    }

    /// Mark the task completed and emit the final status event
    ///
    /// If the task already reached a terminal state (e.g. a concurrent
    /// cancel), that state is reported instead.
    pub async fn complete(&self) {
        self.update_status(TaskState::Completed, None).await;
    }

    /// Fill in task/context/message ids the sender left blank
    fn stamp(&self, mut message: Message) -> Message {
        if message.message_id.is_none() {
            message.message_id = Some(uuid::Uuid::now_v7().to_string());
        }
        message.task_id.get_or_insert_with(|| self.task_id.clone());
        message
            .context_id
            .get_or_insert_with(|| self.context_id.clone());
        message
    }

    fn emit(&self, event: UpdateEvent) {
        if let Some(subscriber) = &self.subscriber {
            // Subscriber gone means the client disconnected; the turn goes on.
            let _ = subscriber.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::Task;

    use super::*;

    async fn store_with_task(task_id: &str) -> Arc<TaskStore> {
        let store = Arc::new(TaskStore::new());
        store.insert(Task::new(task_id, "ctx-1")).await;
        store
    }

    #[tokio::test]
    async fn test_update_status_persists_and_emits() {
        let store = store_with_task("task-1").await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let updater = TaskUpdater::new(store.clone(), "task-1", "ctx-1").with_subscriber(tx);

        updater
            .update_status(TaskState::Working, Some(Message::agent("thinking")))
            .await;

        let task = store.get("task-1").await.expect("task stored");
        assert_eq!(task.status.state, TaskState::Working);

        match rx.recv().await.expect("event emitted") {
            UpdateEvent::StatusUpdate(event) => {
                assert_eq!(event.task_id, "task-1");
                assert_eq!(event.status.state, TaskState::Working);
                assert!(!event.is_final);
                let message = event.status.message.expect("status message");
                assert_eq!(message.task_id.as_deref(), Some("task-1"));
                assert!(message.message_id.is_some());
            }
            other => panic!("Expected status update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_artifact_persists_and_emits() {
        let store = store_with_task("task-1").await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let updater = TaskUpdater::new(store.clone(), "task-1", "ctx-1").with_subscriber(tx);

        updater
            .add_artifact(vec![MessagePart::text("answer")], "Response")
            .await;

        let task = store.get("task-1").await.expect("task stored");
        assert_eq!(task.artifacts.len(), 1);

        match rx.recv().await.expect("event emitted") {
            UpdateEvent::ArtifactUpdate(event) => {
                assert_eq!(event.artifact.name.as_deref(), Some("Response"));
                assert!(event.last_chunk);
            }
            other => panic!("Expected artifact update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_reports_existing_terminal_state() {
        let store = store_with_task("task-1").await;
        store.cancel("task-1").await.expect("cancel");

        let (tx, mut rx) = mpsc::unbounded_channel();
        let updater = TaskUpdater::new(store.clone(), "task-1", "ctx-1").with_subscriber(tx);
        updater.complete().await;

        match rx.recv().await.expect("event emitted") {
            UpdateEvent::StatusUpdate(event) => {
                assert_eq!(event.status.state, TaskState::Canceled);
                assert!(event.is_final);
            }
            other => panic!("Expected status update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_tolerated() {
        let store = store_with_task("task-1").await;
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let updater = TaskUpdater::new(store.clone(), "task-1", "ctx-1").with_subscriber(tx);
        updater.complete().await;

        let task = store.get("task-1").await.expect("task stored");
        assert_eq!(task.status.state, TaskState::Completed);
    }
}
