use async_trait::async_trait;

use crate::core::errors::RecognitionError;
use crate::core::models::{CaptureBuffer, EngineLocation};

#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Returns the recognized text; an empty string means no text was found.
    async fn recognize_text(
        &self,
        image: &CaptureBuffer,
        location: &EngineLocation,
    ) -> Result<String, RecognitionError>;
}
