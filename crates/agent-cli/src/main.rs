//! party-agent CLI
//!
//! Reads one line from standard input as the user message, runs the
//! dispatch loop to completion, and prints the final answer to stdout.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{AgentBuilder, GenerationOptions};
use agent_runtime::{OllamaEmbedder, OllamaProvider};
use party_planner::{dataset_path, load_guests, tools, GuestIndex, PARTY_PLANNER_PROMPT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default; RUST_LOG overrides.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let provider = Arc::new(OllamaProvider::from_env());

    let guests = load_guests(dataset_path()).context("loading guest dataset")?;
    let embedder = Arc::new(OllamaEmbedder::from_env());
    let index = GuestIndex::build(&guests, embedder)
        .await
        .context("building guest embedding index")?;

    let agent = AgentBuilder::new()
        .provider(provider)
        .tools(tools::registry(Arc::new(index)))
        .system_prompt(PARTY_PLANNER_PROMPT)
        .model(
            std::env::var("AGENT_MODEL")
                .unwrap_or_else(|_| GenerationOptions::default().model),
        )
        .build()?;

    print!("Enter your message: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading user message")?;
    let question = line.trim();

    if question.is_empty() {
        anyhow::bail!("no message given");
    }

    let answer = agent.ask(question).await?;
    println!("{}", answer);

    Ok(())
}
