//! The question answering agent
//!
//! Bridges an inbound A2A message to the completion endpoint: report a
//! working status, forward the text to the model, attach the reply (or the
//! failure description) as the turn's artifact.

use std::sync::Arc;

use async_trait::async_trait;

use crate::llm::Completion;
use crate::protocol::{A2AError, Message, MessagePart, TaskState};
use crate::server::{AgentExecutor, TaskUpdater};

/// Placeholder agent message reported while the model call is in flight
pub const THINKING_MESSAGE: &str = "🤔 Thinking...";

/// Artifact name for a successful model reply
pub const RESPONSE_ARTIFACT: &str = "Response";

/// Artifact name for a failed model call
pub const ERROR_ARTIFACT: &str = "Error";

/// An agent that answers questions with a hosted LLM
///
/// One completion call per turn, no retries, no local timeout. A failed call
/// never fails the turn: the error text becomes an artifact named
/// [`ERROR_ARTIFACT`] and the task still completes.
pub struct QaAgent {
    llm: Arc<dyn Completion>,
}

impl QaAgent {
    /// Create an agent backed by the given completion source
    pub fn new(llm: impl Completion) -> Self {
        Self { llm: Arc::new(llm) }
    }

    /// Create an agent from an already-shared completion source
    pub fn from_shared(llm: Arc<dyn Completion>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AgentExecutor for QaAgent {
    async fn execute(&self, message: Message, updater: TaskUpdater) -> Result<(), A2AError> {
        updater
            .update_status(TaskState::Working, Some(Message::agent(THINKING_MESSAGE)))
            .await;

        let input_text = message.text_content();

        match self.llm.complete(&input_text).await {
            Ok(reply) => {
                updater
                    .add_artifact(vec![MessagePart::text(reply)], RESPONSE_ARTIFACT)
                    .await;
            }
            Err(error) => {
                tracing::warn!(task_id = %updater.task_id(), error = %error, "completion call failed");
                let error_text = format!("Error calling completion API: {}", error);
                updater
                    .add_artifact(vec![MessagePart::text(error_text)], ERROR_ARTIFACT)
                    .await;
            }
        }

        Ok(())
    }
}
