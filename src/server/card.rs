//! Agent Card construction
//!
//! Builds the static discovery document served at
//! `/.well-known/agent-card.json`. The card never changes at runtime; only
//! the advertised URL depends on startup arguments.

use crate::llm::DEFAULT_MODEL;
use crate::protocol::{AgentCapabilities, AgentCard, AgentSkill};

/// Resolve the URL advertised in the agent card
///
/// An explicit `--card-url` wins; otherwise the bind address is advertised.
pub fn advertised_url(host: &str, port: u16, card_url: Option<&str>) -> String {
    match card_url {
        Some(url) => url.to_string(),
        None => format!("http://{}:{}/", host, port),
    }
}

/// Build the agent card for this server
pub fn agent_card(url: &str) -> AgentCard {
    let skill = AgentSkill::new(
        "general-qa",
        "General Question Answering",
        "Answer questions on various topics including technology, science, \
         coding, and general knowledge using a hosted large language model.",
    )
    .with_tags(vec![
        "qa".to_string(),
        "llm".to_string(),
        "general-purpose".to_string(),
    ])
    .with_examples(vec![
        "What is the difference between 5G and 4G?".to_string(),
        "Explain how machine learning works".to_string(),
        "Write a Rust function to sort a vector".to_string(),
        "What are the key features of the A2A protocol?".to_string(),
    ]);

    AgentCard::builder()
        .name("General QA Agent")
        .description(format!(
            "An LLM-powered agent that answers questions and assists with \
             various tasks over the A2A protocol, backed by the {} model.",
            DEFAULT_MODEL
        ))
        .url(url)
        .version(env!("CARGO_PKG_VERSION"))
        .default_input_modes(vec!["text".to_string()])
        .default_output_modes(vec!["text".to_string()])
        .capabilities(AgentCapabilities::new().with_streaming())
        .skill(skill)
        .build()
}
