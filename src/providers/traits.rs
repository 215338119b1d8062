use crate::error::BotError;
use async_trait::async_trait;

/// Source of generated background images. The real client talks to the image
/// API; a dry run swaps in a synthetic blank frame.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render the prompt and return encoded image bytes. Must fail loudly if
    /// the upstream response carries no usable image.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, BotError>;
}
