// CareLink Backend Entry Point
// Intent-routing agent for the healthcare helpdesk

mod agent;
mod brain;
mod config;
mod error;
mod fs_manager;
mod llm;
mod models;
mod store;

#[cfg(test)]
mod tests;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use agent::Agent;
use brain::{IntentClassifier, Responder};
use config::LlmConfig;
use fs_manager::PortablePathManager;
use llm::GroqClient;

/// Loads the persisted classifier, retraining from the intents corpus when
/// the blob is missing or unreadable.
fn load_or_train(
    intents: &models::IntentFile,
    model_path: &Path,
) -> Result<IntentClassifier, error::AppError> {
    match IntentClassifier::load(model_path) {
        Ok(classifier) => {
            info!("Loaded classifier from {:?}", model_path);
            Ok(classifier)
        }
        Err(e) => {
            warn!("Could not load model ({}), retraining from corpus", e);
            let classifier = IntentClassifier::fit(intents)?;
            classifier.save(model_path)?;
            Ok(classifier)
        }
    }
}

/// Retrains from the intents corpus and persists the blob, without entering
/// the interactive loop.
fn train_only(intents_path: &Path, model_path: &Path) -> anyhow::Result<()> {
    let intents = store::load_intents(intents_path)
        .with_context(|| format!("failed to read intents from {:?}", intents_path))?;
    let classifier = IntentClassifier::fit(&intents)?;
    classifier.save(model_path)?;

    println!("Model saved to {}", model_path.display());
    Ok(())
}

async fn run_repl() -> anyhow::Result<()> {
    let config = LlmConfig::from_env()?;
    let intents_path = PortablePathManager::intents_path();
    let model_path = PortablePathManager::model_path();

    let intents = store::load_intents(&intents_path)
        .with_context(|| format!("failed to read intents from {:?}", intents_path))?;
    let classifier = load_or_train(&intents, &model_path)?;

    let mut agent = Agent::new(
        classifier,
        Responder::new(intents),
        GroqClient::new(config),
        intents_path,
        model_path,
    );

    println!("CareLink Agent: Hello! How can I assist you today? (Type 'exit' to quit)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // stdin closed
        };
        let input = line?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            println!("CareLink Agent: Goodbye!");
            break;
        }

        let reply = agent.handle(input).await?;
        println!("CareLink Agent: {}", reply);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    PortablePathManager::init()?;

    // `carelink-core train` retrains and exits; no arguments starts the REPL.
    match std::env::args().nth(1).as_deref() {
        Some("train") => train_only(
            &PortablePathManager::intents_path(),
            &PortablePathManager::model_path(),
        ),
        Some(other) => anyhow::bail!("unknown command: {}", other),
        None => run_repl().await,
    }
}
