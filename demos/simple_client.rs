//! Scripted demonstration against a running QA agent server.
//!
//! Start the server first (`a2a-qa-agent --port 9009`), then run:
//! `cargo run --example simple_client [agent-url]`

use futures::{pin_mut, StreamExt};

use a2a_qa_agent::client::AgentClient;
use a2a_qa_agent::protocol::{Message, MessagePart, Task, UpdateEvent};

const TEST_QUESTIONS: &[&str] = &[
    "Hello! Can you introduce yourself?",
    "What is the A2A protocol?",
    "Write a simple Rust hello world function.",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let agent_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:9009".to_string());

    println!("🔗 Connecting to agent at {agent_url}...");
    let client = AgentClient::new(agent_url.parse()?);

    // Step 1: Discover agent capabilities
    let card = client.discover().await?;
    println!("✅ Connected to: {}", card.name);
    println!("📝 Description: {}", card.description);
    println!(
        "🎯 Skills: {:?}",
        card.skills.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
    );
    println!("{}", "-".repeat(50));

    // Step 2: Send each test question and print the answer
    for question in TEST_QUESTIONS {
        println!("\n💬 User: {question}");

        let task = client.send_message(Message::user(*question)).await?;
        let answer = collect_artifact_text(&task);

        println!("🤖 Agent: {}", truncate(&answer, 500));
        println!("{}", "-".repeat(50));
    }

    // Step 3: One streaming turn, printing events as they arrive
    let question = "Explain streaming in the A2A protocol in one sentence.";
    println!("\n💬 User (streaming): {question}");

    let stream = client
        .send_message_streaming(Message::user(question))
        .await?;
    pin_mut!(stream);

    while let Some(event) = stream.next().await {
        match event? {
            UpdateEvent::StatusUpdate(update) => {
                println!("  ⏳ status: {:?}", update.status.state);
                if update.is_final {
                    break;
                }
            }
            UpdateEvent::ArtifactUpdate(update) => {
                let name = update.artifact.name.as_deref().unwrap_or("unnamed");
                println!(
                    "  📦 artifact [{}]: {}",
                    name,
                    truncate(&update.artifact.text_content(), 500)
                );
            }
        }
    }

    println!("\n✅ Demonstration completed!");
    Ok(())
}

/// Concatenate the text of every artifact on the task
fn collect_artifact_text(task: &Task) -> String {
    let mut text = String::new();
    for artifact in &task.artifacts {
        for part in &artifact.parts {
            match part {
                MessagePart::Text { text: part_text } => text.push_str(part_text),
                MessagePart::File { file } => {
                    let name = file.name.as_deref().unwrap_or("file");
                    text.push_str(&format!("[File: {name}]"));
                }
                MessagePart::Data { .. } => text.push_str("[Structured data]"),
            }
        }
    }
    text
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() > limit {
        let cut = text
            .char_indices()
            .take_while(|(i, _)| *i < limit)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(limit);
        format!("{}...", &text[..cut])
    } else {
        text.to_string()
    }
}
