//! Response engine - the single entry point other layers call.
//!
//! Classifies a message, then renders it against the current knowledge base
//! snapshot. Holds no per-conversation state.

use std::time::Instant;
use tracing::debug;

use super::fallback::FallbackSelector;
use super::intent::{Intent, IntentClassifier};
use super::responses::ResponseGenerator;
use crate::error::Degraded;
use crate::knowledge::KnowledgeStore;

#[derive(Debug)]
pub struct ResponseEngine {
    store: KnowledgeStore,
    classifier: IntentClassifier,
    generator: ResponseGenerator,
}

impl ResponseEngine {
    /// Engine with an unseeded fallback selector.
    pub fn new(store: KnowledgeStore) -> Self {
        Self::with_fallback(store, FallbackSelector::new())
    }

    pub fn with_fallback(store: KnowledgeStore, fallback: FallbackSelector) -> Self {
        Self {
            store,
            classifier: IntentClassifier::new(),
            generator: ResponseGenerator::new(fallback),
        }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn classify(&self, user_message: &str) -> Intent {
        self.classifier.classify(user_message)
    }

    /// Answers one user message.
    ///
    /// Callers reject empty input first. Never fails: an unloaded knowledge base
    /// or missing crop data yields an explanatory message instead.
    pub fn generate_response(&self, user_message: &str) -> String {
        let Some(kb) = self.store.snapshot() else {
            debug!("knowledge base not ready");
            return Degraded::KnowledgeBaseUnavailable.to_string();
        };

        let start = Instant::now();
        let intent = self.classifier.classify(user_message);
        let response = self.generator.render(&intent, &kb);

        debug!(
            subtopic = %intent.subtopic,
            crop = ?intent.primary_crop(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "response generated"
        );

        response
    }
}
