//! # A2A QA Agent
//!
//! An LLM-backed question answering agent speaking the Agent2Agent (A2A)
//! protocol. The agent receives a text message, forwards it to a hosted
//! OpenAI-compatible completion endpoint, and returns the model's reply as a
//! task artifact.
//!
//! ## Architecture
//!
//! - [`protocol`] - A2A wire types: messages, tasks, artifacts, agent cards,
//!   update events, and JSON-RPC envelopes
//! - [`llm`] - the completion client adapter around the hosted model
//! - [`agent`] - the executor bridging inbound messages to the model
//! - [`server`] - axum HTTP server: card discovery, JSON-RPC dispatch,
//!   SSE streaming, in-memory task store
//! - [`client`] - JSON-RPC client used by the demonstration script
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_qa_agent::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LlmConfig::from_env()?;
//!     let agent = QaAgent::new(CompletionClient::new(config));
//!
//!     let url = a2a_qa_agent::server::advertised_url("127.0.0.1", 9009, None);
//!     let state = AppState::new(agent, a2a_qa_agent::server::agent_card(&url));
//!
//!     a2a_qa_agent::server::serve("127.0.0.1", 9009, state).await
//! }
//! ```

pub mod agent;
pub mod client;
pub mod llm;
pub mod protocol;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        agent::QaAgent,
        client::AgentClient,
        llm::{Completion, CompletionClient, CompletionError, LlmConfig},
        protocol::{A2AError, AgentCard, Message, MessagePart, Role, Task, TaskState},
        server::{AgentExecutor, AppState, TaskUpdater},
    };
}
