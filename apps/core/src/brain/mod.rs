//! # Brain Module
//!
//! Deterministic response selection for FarmMate. No model, no scoring:
//! keyword containment picks a topic and a template renders the answer.
//!
//! ## Components
//! - `crop`: the fixed crop set and per-crop constants
//! - `intent`: ordered keyword classification
//! - `responses`: per-topic templates
//! - `fallback`: follow-up prompts and random redirects
//! - `engine`: main orchestrator

pub mod crop;
pub mod engine;
pub mod fallback;
pub mod intent;
pub mod responses;

pub use crop::Crop;
pub use engine::ResponseEngine;
pub use fallback::{FallbackSelector, RandomSource, SeededRandom, ThreadRandom};
pub use intent::{CropTopic, GeneralTopic, Intent, IntentClassifier, Subtopic};
pub use responses::ResponseGenerator;
