//! A2A QA agent server binary

use anyhow::Context;
use clap::Parser;

use a2a_qa_agent::agent::QaAgent;
use a2a_qa_agent::llm::{CompletionClient, LlmConfig};
use a2a_qa_agent::server::{self, AppState};

/// Run the QA agent A2A server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Host to bind the server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server
    #[arg(long, default_value_t = 9009)]
    port: u16,

    /// URL to advertise in the agent card
    #[arg(long)]
    card_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = LlmConfig::from_env()
        .context("DASHSCOPE_API_KEY must be set in the environment")?;
    let agent = QaAgent::new(CompletionClient::new(config));

    let url = server::advertised_url(&args.host, args.port, args.card_url.as_deref());
    let state = AppState::new(agent, server::agent_card(&url));

    server::serve(&args.host, args.port, state).await
}
