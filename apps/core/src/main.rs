// FarmMate console entry point
// Loads the crop data, then runs a read-respond loop on stdin.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farmmate_core::brain::{FallbackSelector, ResponseEngine};
use farmmate_core::config::{AppConfig, LogFormat};
use farmmate_core::console::{ConsoleDisplay, ConsoleSpeech};
use farmmate_core::knowledge::{DataSource, KnowledgeStore};
use farmmate_core::session::{Capabilities, ConversationSession, Pacing, SimulatedCapture};

const SUGGESTIONS: [&str; 4] = [
    "Tell me about maize diseases",
    "Best varieties for cassava",
    "When should I harvest cocoa?",
    "Soil management tips",
];

const HELP: &str = "Commands: /mute, /record, /reload, /transcript, /help, /quit. Type a number to ask a suggested question.";

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::new(&config.log_filter);
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_suggestions() {
    println!("Try asking:");
    for (i, question) in SUGGESTIONS.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }
    println!("{}", HELP);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("reading configuration")?;
    init_tracing(&config);

    let source = DataSource::parse(&config.data_source).context("parsing FARMMATE_DATA_SOURCE")?;
    let store = KnowledgeStore::new(source);

    let fallback = match config.fallback_seed {
        Some(seed) => FallbackSelector::seeded(seed),
        None => FallbackSelector::new(),
    };
    let engine = Arc::new(ResponseEngine::with_fallback(store, fallback));

    let caps = Capabilities {
        display: Arc::new(ConsoleDisplay::new(config.typing_speed)),
        speech: Arc::new(ConsoleSpeech::default()),
        capture: Arc::new(SimulatedCapture::default()),
    };
    let mut session = ConversationSession::new(engine, caps, Pacing::from_config(&config))
        .with_muted(config.start_muted);
    info!(session = %session.id(), "session started");

    // A failed load leaves the engine answering "still loading" until /reload.
    if let Err(e) = session.reload_knowledge().await {
        error!("initial knowledge load failed: {}", e);
    }

    print_suggestions();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let input = line.trim();
        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => print_suggestions(),
            "/mute" => {
                let muted = session.toggle_mute().await;
                println!("Speech {}", if muted { "muted" } else { "unmuted" });
            }
            "/record" => {
                let was_recording = session.is_recording();
                session.toggle_recording().await;
                if !was_recording && session.is_recording() {
                    println!("Recording... type /record again to stop.");
                }
            }
            "/transcript" => match session.transcript_json() {
                Ok(json) => println!("{}", json),
                Err(e) => error!("transcript export failed: {}", e),
            },
            "/reload" => match session.reload_knowledge().await {
                Ok(()) => println!("Farming data reloaded."),
                Err(e) => error!("reload failed: {}", e),
            },
            other => {
                let question = other
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| SUGGESTIONS.get(i).copied())
                    .unwrap_or(other);
                session.handle_input(question).await;
            }
        }
    }

    info!(session = %session.id(), turns = session.transcript().len(), "session ended");
    Ok(())
}
