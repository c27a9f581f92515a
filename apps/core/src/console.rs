//! Terminal implementations of the session capabilities.

use async_trait::async_trait;
use regex::Regex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::info;

use crate::error::AppError;
use crate::session::{ChatDisplay, TextToSpeech, Utterance};

const ASSISTANT_NAME: &str = "FarmMate AI";

static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>").expect("Invalid regex: block end"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex: markup tag"));

/// Turns a response fragment into plain lines, one per block.
pub fn markup_to_lines(response: &str) -> Vec<String> {
    let separated = BLOCK_END.replace_all(response, "\n");
    let plain = ANY_TAG.replace_all(&separated, "");
    plain
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prints the conversation to stdout, typing replies character by character.
#[derive(Debug, Clone)]
pub struct ConsoleDisplay {
    typing_speed: Duration,
}

impl ConsoleDisplay {
    pub fn new(typing_speed: Duration) -> Self {
        Self { typing_speed }
    }
}

#[async_trait]
impl ChatDisplay for ConsoleDisplay {
    async fn show_user(&self, message: &str) {
        println!("You: {}", message);
    }

    async fn show_thinking(&self) {
        print!("{} is thinking...", ASSISTANT_NAME);
        let _ = io::stdout().flush();
    }

    async fn hide_thinking(&self) {
        // Carriage return and clear the line.
        print!("\r\x1b[2K");
        let _ = io::stdout().flush();
    }

    async fn type_response(&self, response: &str) {
        let text = markup_to_lines(response).join("\n  ");
        print!("{}: ", ASSISTANT_NAME);

        if self.typing_speed.is_zero() {
            println!("{}", text);
            return;
        }

        for ch in text.chars() {
            print!("{}", ch);
            let _ = io::stdout().flush();
            tokio::time::sleep(self.typing_speed).await;
        }
        println!();
    }

    async fn show_error(&self, message: &str) {
        eprintln!("{}: [error] {}", ASSISTANT_NAME, message);
    }
}

/// Stand-in voice for terminals: logs what would be spoken.
#[derive(Debug, Default)]
pub struct ConsoleSpeech {
    speaking: AtomicBool,
}

#[async_trait]
impl TextToSpeech for ConsoleSpeech {
    async fn speak(&self, utterance: Utterance) -> Result<(), AppError> {
        self.speaking.store(true, Ordering::SeqCst);
        info!(
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            "speaking: {}",
            utterance.text
        );
        // Logging completes immediately.
        self.speaking.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn cancel(&self) {
        self.speaking.store(false, Ordering::SeqCst);
    }

    async fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}
