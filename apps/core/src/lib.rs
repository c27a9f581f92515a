//! FarmMate core: keyword-driven crop advice for Ghanaian farmers.
//!
//! `brain` maps a message to a templated answer, `knowledge` loads the crop
//! data it answers from, and `session` wraps both in a conversation.

pub mod brain;
pub mod config;
pub mod console;
pub mod error;
pub mod knowledge;
pub mod session;

pub use brain::ResponseEngine;
pub use config::AppConfig;
pub use error::{AppError, Degraded};
pub use knowledge::{DataSource, KnowledgeBase, KnowledgeStore};

#[cfg(test)]
mod tests;
