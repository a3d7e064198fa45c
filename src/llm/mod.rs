//! Chat-completion client adapter
//!
//! Wraps a hosted OpenAI-compatible completion endpoint behind the
//! [`Completion`] trait: one blocking request per invocation, a fixed system
//! prompt, and fixed sampling parameters. Failures come back as
//! [`CompletionError`] values so callers branch on a tagged result instead of
//! catching anything.

mod client;
mod config;

pub use client::{Completion, CompletionClient, CompletionError};
pub use config::{LlmConfig, DEFAULT_MODEL};
