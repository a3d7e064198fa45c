//! Agent business logic entry point

use async_trait::async_trait;

use crate::protocol::{A2AError, Message};

use super::updater::TaskUpdater;

/// Agent business logic entry point
///
/// Implement this trait to define how the agent processes an inbound message.
/// The server invokes `execute` once per turn with a fresh [`TaskUpdater`];
/// status transitions and artifacts are reported through it. Returning an
/// error marks the whole turn as a server failure, so agents that want a
/// failed call to stay an ordinary turn report it as an artifact instead.
#[async_trait]
pub trait AgentExecutor: Send + Sync + 'static {
    /// Process one inbound message, reporting progress and results through
    /// the updater
    async fn execute(&self, message: Message, updater: TaskUpdater) -> Result<(), A2AError>;
}
