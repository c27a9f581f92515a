//! Simulated voice capture.
//!
//! There is no recogniser behind it: stopping a recording yields one of a few
//! typical farmer questions.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use super::capabilities::AudioCapture;
use crate::brain::fallback::{RandomSource, ThreadRandom};
use crate::error::AppError;

pub const SIMULATED_QUESTIONS: [&str; 5] = [
    "Tell me about maize diseases",
    "How to prevent rice blast",
    "Best varieties for cassava",
    "Cocoa fertilizer recommendations",
    "What are common yam diseases",
];

pub struct SimulatedCapture {
    recording: AtomicBool,
    random: Box<dyn RandomSource>,
}

impl Default for SimulatedCapture {
    fn default() -> Self {
        Self::new(Box::new(ThreadRandom))
    }
}

impl SimulatedCapture {
    pub fn new(random: Box<dyn RandomSource>) -> Self {
        Self {
            recording: AtomicBool::new(false),
            random,
        }
    }
}

#[async_trait]
impl AudioCapture for SimulatedCapture {
    async fn start(&self) -> Result<(), AppError> {
        if self.recording.swap(true, Ordering::SeqCst) {
            return Err(AppError::Capability("microphone already in use".to_string()));
        }
        info!("recording started");
        Ok(())
    }

    async fn stop(&self) -> Result<Option<String>, AppError> {
        if !self.recording.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        let index = self.random.pick(SIMULATED_QUESTIONS.len()) % SIMULATED_QUESTIONS.len();
        info!("recording stopped");
        Ok(Some(SIMULATED_QUESTIONS[index].to_string()))
    }
}
