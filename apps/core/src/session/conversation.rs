//! Conversation session: turn-taking, display and speech around the engine.
//!
//! All mutable UI state (mute, recording, transcript) lives here. The engine
//! it drives stays stateless.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::capabilities::{AudioCapture, ChatDisplay, TextToSpeech};
use super::speech::Utterance;
use crate::brain::fallback::{RandomSource, ThreadRandom};
use crate::brain::ResponseEngine;
use crate::config::AppConfig;
use crate::error::AppError;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load farming data. Please refresh the page.";
pub const MICROPHONE_DENIED_MESSAGE: &str =
    "Microphone access denied. Please allow microphone permissions to use voice recording.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the in-memory transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// The artificial pause before each reply: `delay` plus up to `jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub delay: Duration,
    pub jitter: Duration,
}

impl Pacing {
    pub const IMMEDIATE: Pacing = Pacing {
        delay: Duration::ZERO,
        jitter: Duration::ZERO,
    };

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            delay: config.response_delay,
            jitter: config.response_jitter,
        }
    }
}

/// External collaborators the session talks to.
#[derive(Clone)]
pub struct Capabilities {
    pub display: Arc<dyn ChatDisplay>,
    pub speech: Arc<dyn TextToSpeech>,
    pub capture: Arc<dyn AudioCapture>,
}

pub struct ConversationSession {
    id: Uuid,
    engine: Arc<ResponseEngine>,
    caps: Capabilities,
    pacing: Pacing,
    random: Box<dyn RandomSource>,
    muted: bool,
    recording: bool,
    load_failure_reported: bool,
    transcript: Vec<Turn>,
}

impl ConversationSession {
    pub fn new(engine: Arc<ResponseEngine>, caps: Capabilities, pacing: Pacing) -> Self {
        Self {
            id: Uuid::new_v4(),
            engine,
            caps,
            pacing,
            random: Box::new(ThreadRandom),
            muted: false,
            recording: false,
            load_failure_reported: false,
            transcript: Vec::new(),
        }
    }

    /// Replaces the randomness used for the reply pause.
    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// The transcript as pretty-printed JSON.
    pub fn transcript_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.transcript)?)
    }

    /// Runs one user turn.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the reply is shown,
    /// spoken unless muted, recorded in the transcript and returned.
    #[instrument(skip(self, raw), fields(session = %self.id))]
    pub async fn handle_input(&mut self, raw: &str) -> Option<String> {
        let message = raw.trim();
        if message.is_empty() {
            return None;
        }

        self.caps.display.show_user(message).await;
        self.record(Speaker::User, message);
        self.caps.display.show_thinking().await;

        let pause = self.reply_pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let response = self.engine.generate_response(message);

        self.caps.display.hide_thinking().await;
        self.caps.display.type_response(&response).await;
        self.record(Speaker::Assistant, &response);

        if !self.muted {
            self.speak(&response).await;
        }

        Some(response)
    }

    /// Flips the mute flag and returns the new value.
    ///
    /// Muting silences current speech; unmuting reads the last reply again.
    pub async fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        info!(session = %self.id, muted = self.muted, "mute toggled");

        if self.muted {
            self.caps.speech.cancel().await;
        } else if let Some(last) = self.last_assistant_message() {
            self.speak(&last).await;
        }

        self.muted
    }

    /// Starts or stops voice capture.
    ///
    /// Stopping feeds the captured question through [`Self::handle_input`] and
    /// returns its reply.
    pub async fn toggle_recording(&mut self) -> Option<String> {
        if self.recording {
            self.recording = false;
            match self.caps.capture.stop().await {
                Ok(Some(question)) => self.handle_input(&question).await,
                Ok(None) => None,
                Err(e) => {
                    warn!(session = %self.id, "failed to stop recording: {}", e);
                    self.caps.display.show_error(&e.to_string()).await;
                    None
                }
            }
        } else {
            match self.caps.capture.start().await {
                Ok(()) => self.recording = true,
                Err(e) => {
                    warn!(session = %self.id, "failed to start recording: {}", e);
                    self.caps.display.show_error(MICROPHONE_DENIED_MESSAGE).await;
                }
            }
            None
        }
    }

    /// Reloads the knowledge base, reporting a failure to the user once.
    pub async fn reload_knowledge(&mut self) -> Result<(), AppError> {
        match self.engine.store().reload().await {
            Ok(_) => {
                self.load_failure_reported = false;
                Ok(())
            }
            Err(e) => {
                self.report_load_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Shows the load failure banner unless it has already been shown.
    pub async fn report_load_failure(&mut self, err: &AppError) {
        if self.load_failure_reported {
            return;
        }
        warn!(session = %self.id, "knowledge base unavailable: {}", err);
        self.caps.display.show_error(LOAD_FAILURE_MESSAGE).await;
        self.load_failure_reported = true;
    }

    async fn speak(&self, response: &str) {
        if self.caps.speech.is_speaking().await {
            self.caps.speech.cancel().await;
        }
        let utterance = Utterance::from_response(response);
        if utterance.text.is_empty() {
            return;
        }
        if let Err(e) = self.caps.speech.speak(utterance).await {
            warn!(session = %self.id, "speech failed: {}", e);
        }
    }

    fn last_assistant_message(&self) -> Option<String> {
        self.transcript
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::Assistant)
            .map(|turn| turn.text.clone())
    }

    fn reply_pause(&self) -> Duration {
        let jitter_ms = u64::try_from(self.pacing.jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.pacing.delay;
        }
        // Inclusive of `jitter_ms`, clamped to what the random source can express.
        let upper = usize::try_from(jitter_ms.saturating_add(1)).unwrap_or(usize::MAX);
        let extra = u64::try_from(self.random.pick(upper)).unwrap_or(u64::MAX);
        self.pacing
            .delay
            .saturating_add(Duration::from_millis(extra.min(jitter_ms)))
    }

    fn record(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(Turn {
            speaker,
            text: text.to_string(),
            at: Utc::now(),
        });
    }
}
