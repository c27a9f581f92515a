//! # Session Module
//!
//! Everything between the user and the engine: turn-taking, the reply pause,
//! speech and voice capture.
//!
//! ## Components
//! - `capabilities`: display, speech and capture traits
//! - `speech`: markup cleanup and voice settings
//! - `capture`: simulated voice input
//! - `conversation`: the session state object

pub mod capabilities;
pub mod capture;
pub mod conversation;
pub mod speech;

pub use capabilities::{AudioCapture, ChatDisplay, TextToSpeech};
pub use capture::SimulatedCapture;
pub use conversation::{Capabilities, ConversationSession, Pacing, Speaker, Turn};
pub use speech::Utterance;
