use std::sync::Arc;

use crate::core::errors::CaptureError;
use crate::core::interfaces::adapters::RecognitionEngine;
use crate::core::interfaces::ports::ScreenCapturer;
use crate::core::models::{CaptureResult, EngineConfig, SelectionRectangle};
use crate::global_constants::LOG_TAG_PIPELINE;

/// Grabs the pixels of a selection and runs them through the recognition
/// engine. Recognition errors are returned as-is; nothing is retried.
#[derive(Clone)]
pub struct CapturePipeline {
    screen_capturer: Arc<dyn ScreenCapturer>,
    recognition_engine: Arc<dyn RecognitionEngine>,
}

impl CapturePipeline {
    pub fn build(
        screen_capturer: Arc<dyn ScreenCapturer>,
        recognition_engine: Arc<dyn RecognitionEngine>,
    ) -> Self {
        Self {
            screen_capturer,
            recognition_engine,
        }
    }

    pub fn screen_capturer(&self) -> &Arc<dyn ScreenCapturer> {
        &self.screen_capturer
    }

    pub async fn run(
        &self,
        global_region: &SelectionRectangle,
        engine_config: &EngineConfig,
    ) -> Result<CaptureResult, CaptureError> {
        let region = global_region.normalized();
        log::info!(
            "{} Capturing {}x{} at ({}, {})",
            LOG_TAG_PIPELINE,
            region.width(),
            region.height(),
            region.left(),
            region.top()
        );

        let image = self
            .screen_capturer
            .capture_screen_region(&region)
            .map_err(|error| CaptureError::ScreenCapture(format!("{:#}", error)))?;

        log::debug!(
            "{} Captured buffer {}x{}, running recognition",
            LOG_TAG_PIPELINE,
            image.width,
            image.height
        );

        let recognized_text = self
            .recognition_engine
            .recognize_text(&image, engine_config.location())
            .await?;

        log::info!(
            "{} Recognition complete, {} characters",
            LOG_TAG_PIPELINE,
            recognized_text.chars().count()
        );

        Ok(CaptureResult::new(recognized_text, image))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::core::errors::RecognitionError;
    use crate::core::models::{OverlayPoint, ScreenOffset};

    fn region(ax: i32, ay: i32, bx: i32, by: i32) -> SelectionRectangle {
        SelectionRectangle::between(OverlayPoint::new(ax, ay), OverlayPoint::new(bx, by))
    }

    #[tokio::test]
    async fn test_run_returns_text_and_captured_pixels() {
        let desktop = Arc::new(VirtualDesktop::new(ScreenOffset::default(), 64, 64));
        let engine = Arc::new(ScriptedEngine::returning(EngineBehaviour::Text("hello")));
        let pipeline = CapturePipeline::build(desktop.clone(), engine.clone());

        let result = pipeline.run(&region(10, 20, 30, 25), &EngineConfig::default()).await.unwrap();

        assert_eq!(result.recognized_text, "hello");
        assert_eq!(result.image.width, 20);
        assert_eq!(result.image.height, 5);
        assert_eq!(&result.image.raw_data()[0..2], &[10, 20]);
        assert_eq!(engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_normalizes_region_before_capture() {
        let desktop = Arc::new(VirtualDesktop::new(ScreenOffset::default(), 64, 64));
        let engine = Arc::new(ScriptedEngine::returning(EngineBehaviour::Text("x")));
        let pipeline = CapturePipeline::build(desktop.clone(), engine);

        let _ = pipeline.run(&region(30, 25, 10, 20), &EngineConfig::default()).await;

        let requested = desktop.requested_regions.lock().unwrap()[0];
        assert_eq!(requested, region(10, 20, 30, 25));
    }

    #[tokio::test]
    async fn test_run_keeps_empty_text_as_success() {
        let desktop = Arc::new(VirtualDesktop::new(ScreenOffset::default(), 32, 32));
        let engine = Arc::new(ScriptedEngine::returning(EngineBehaviour::Text("")));
        let pipeline = CapturePipeline::build(desktop, engine);

        let result = pipeline.run(&region(0, 0, 8, 8), &EngineConfig::default()).await;

        assert_eq!(result.map(|r| r.recognized_text), Ok(String::new()));
    }

    #[tokio::test]
    async fn test_run_propagates_unavailable_engine() {
        let desktop = Arc::new(VirtualDesktop::new(ScreenOffset::default(), 32, 32));
        let engine = Arc::new(ScriptedEngine::returning(EngineBehaviour::Unavailable));
        let pipeline = CapturePipeline::build(desktop, engine);

        let result = pipeline.run(&region(0, 0, 8, 8), &EngineConfig::default()).await;

        assert!(matches!(
            result,
            Err(CaptureError::Recognition(RecognitionError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_run_reports_screen_capture_failure_without_recognition() {
        let engine = Arc::new(ScriptedEngine::returning(EngineBehaviour::Text("unused")));
        let pipeline = CapturePipeline::build(Arc::new(FailingCapturer), engine.clone());

        let result = pipeline.run(&region(0, 0, 8, 8), &EngineConfig::default()).await;

        assert!(matches!(result, Err(CaptureError::ScreenCapture(message)) if message.contains("denied")));
        assert_eq!(engine.call_count(), 0);
    }
}
