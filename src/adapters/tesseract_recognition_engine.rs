use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::core::errors::RecognitionError;
use crate::core::interfaces::adapters::RecognitionEngine;
use crate::core::models::{CaptureBuffer, EngineLocation};
use crate::global_constants::LOG_TAG_TESSERACT;

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs the Tesseract command line as `tesseract <image.png> stdout`.
pub struct TesseractRecognitionEngine;

impl TesseractRecognitionEngine {
    pub fn build() -> Self {
        log::info!("{} Initializing Tesseract recognition engine", LOG_TAG_TESSERACT);
        Self
    }

    fn write_image_to_temp_png(image: &CaptureBuffer) -> Result<NamedTempFile> {
        let file = tempfile::Builder::new()
            .prefix("snip-to-text-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary image file")?;

        image
            .to_dynamic_image()?
            .save_with_format(file.path(), image::ImageFormat::Png)
            .context("Failed to convert image to PNG format")?;

        Ok(file)
    }

    async fn run_engine(engine_path: &Path, input: &Path) -> Result<String, RecognitionError> {
        let mut command = tokio::process::Command::new(engine_path);
        command.arg(input).arg("stdout").kill_on_drop(true);
        #[cfg(target_os = "windows")]
        command.creation_flags(CREATE_NO_WINDOW);

        let output = command.output().await.map_err(|error| {
            RecognitionError::Unavailable(format!("{}: {}", engine_path.display(), error))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => format!("tesseract exited with {}", output.status),
                message => message.to_string(),
            };
            return Err(RecognitionError::Failed(detail));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl RecognitionEngine for TesseractRecognitionEngine {
    async fn recognize_text(
        &self,
        image: &CaptureBuffer,
        location: &EngineLocation,
    ) -> Result<String, RecognitionError> {
        let Some(engine_path) = location.path() else {
            log::warn!("{} No engine location configured", LOG_TAG_TESSERACT);
            return Err(RecognitionError::Unavailable(
                "Tesseract executable not found".to_string(),
            ));
        };

        if image.is_empty() {
            log::debug!("{} Empty image, nothing to recognize", LOG_TAG_TESSERACT);
            return Ok(String::new());
        }

        log::info!("{} Starting text extraction", LOG_TAG_TESSERACT);
        log::debug!(
            "{} Image dimensions: {}x{}",
            LOG_TAG_TESSERACT,
            image.width,
            image.height
        );

        let input = Self::write_image_to_temp_png(image)
            .map_err(|error| RecognitionError::Failed(format!("{:#}", error)))?;
        let extracted_text = Self::run_engine(engine_path, input.path()).await?;

        log::info!(
            "{} Text extraction complete. Extracted {} characters",
            LOG_TAG_TESSERACT,
            extracted_text.len()
        );
        log::debug!("{} Extracted text: {}", LOG_TAG_TESSERACT, extracted_text);

        Ok(extracted_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn small_image() -> CaptureBuffer {
        CaptureBuffer::build_from_raw_data(4, 4, vec![255u8; 4 * 4 * 4]).unwrap()
    }

    #[tokio::test]
    async fn test_unresolved_location_is_unavailable() {
        let engine = TesseractRecognitionEngine::build();

        let result = engine
            .recognize_text(&small_image(), &EngineLocation::unresolved())
            .await;

        assert!(matches!(result, Err(RecognitionError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_missing_executable_is_unavailable() {
        let engine = TesseractRecognitionEngine::build();
        let location = EngineLocation::resolved(PathBuf::from("/definitely/not/here/tesseract"));

        let result = engine.recognize_text(&small_image(), &location).await;

        assert!(matches!(result, Err(RecognitionError::Unavailable(message)) if message.contains("/definitely/not/here")));
    }

    #[tokio::test]
    async fn test_empty_image_returns_empty_text_without_running_engine() {
        let engine = TesseractRecognitionEngine::build();
        let location = EngineLocation::resolved(PathBuf::from("/definitely/not/here/tesseract"));

        let result = engine.recognize_text(&CaptureBuffer::empty(), &location).await;

        assert_eq!(result, Ok(String::new()));
    }

    #[cfg(unix)]
    fn write_script(directory: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = directory.join("fake-tesseract");
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_engine_stdout_is_returned_verbatim() {
        let directory = tempfile::tempdir().unwrap();
        let script = write_script(directory.path(), r#"[ "$2" = "stdout" ] && printf 'Hello\nWorld\n'"#);
        let engine = TesseractRecognitionEngine::build();

        let result = engine
            .recognize_text(&small_image(), &EngineLocation::resolved(script))
            .await;

        assert_eq!(result, Ok("Hello\nWorld\n".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failed_with_stderr() {
        let directory = tempfile::tempdir().unwrap();
        let script = write_script(directory.path(), "echo 'Error in pixReadStream' >&2; exit 1");
        let engine = TesseractRecognitionEngine::build();

        let result = engine
            .recognize_text(&small_image(), &EngineLocation::resolved(script))
            .await;

        assert_eq!(
            result,
            Err(RecognitionError::Failed("Error in pixReadStream".to_string()))
        );
    }
}
