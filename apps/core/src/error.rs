use std::io;
use thiserror::Error;

/// Application-wide error type for everything that happens outside a single turn:
/// loading the knowledge base, reading configuration, talking to collaborators.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed knowledge base documents.
    #[error("JSON error: {0}")]
    Json(String),

    /// Represents failures fetching a remote knowledge base.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., an unusable data source).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents a capability (speech, capture, display) that failed.
    #[error("Capability error: {0}")]
    Capability(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Json(s) => AppError::Json(s.clone()),
            AppError::Http(s) => AppError::Http(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Capability(s) => AppError::Capability(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Validation(format!("URL parse error: {}", err))
    }
}

/// Conditions under which a turn cannot be answered from the knowledge base.
///
/// These never reach the caller as errors: the engine renders their `Display`
/// text as the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Degraded {
    /// The knowledge base has not finished loading, or the last load failed.
    #[error("I'm still loading farming data. Please try again in a moment.")]
    KnowledgeBaseUnavailable,

    /// The classifier named a crop the loaded data does not describe.
    #[error("I don't have specific information about {0} in my database. I specialize in maize, rice, yam, cassava, and cocoa farming advice for Ghana.")]
    UnknownCrop(String),
}
