use async_trait::async_trait;

use super::speech::Utterance;
use crate::error::AppError;

/// Where the conversation is shown.
///
/// Implementations decide how markup is presented; the session only hands over
/// the response fragments.
#[async_trait]
pub trait ChatDisplay: Send + Sync + 'static {
    /// Shows the user's own message.
    async fn show_user(&self, message: &str);

    /// Shows the "thinking" indicator.
    async fn show_thinking(&self);

    async fn hide_thinking(&self);

    /// Presents an assistant response, possibly animated.
    async fn type_response(&self, response: &str);

    /// Shows an error banner to the user.
    async fn show_error(&self, message: &str);
}

/// Speech output.
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Starts speaking. Returns once playback has been queued.
    async fn speak(&self, utterance: Utterance) -> Result<(), AppError>;

    /// Stops any current speech.
    async fn cancel(&self);

    async fn is_speaking(&self) -> bool;
}

/// Voice input.
#[async_trait]
pub trait AudioCapture: Send + Sync + 'static {
    /// Begins recording. Fails when the microphone is unavailable.
    async fn start(&self) -> Result<(), AppError>;

    /// Ends recording and returns the recognised text, if any.
    async fn stop(&self) -> Result<Option<String>, AppError>;
}
