use futures::channel::oneshot;

use crate::core::capture_pipeline::CapturePipeline;
use crate::core::errors::CaptureError;
use crate::core::models::{CaptureResult, EngineConfig, OverlayPoint, ScreenOffset, SelectionRectangle};
use crate::global_constants::LOG_TAG_OVERLAY;

pub type CaptureOutcome = Result<CaptureResult, CaptureError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Idle,
    Dragging,
    Completed,
    Closed,
}

/// Receiving end of an overlay session. Yields exactly one outcome, or
/// `None` when the session ended without a capture.
pub struct CaptureCompletion {
    receiver: oneshot::Receiver<CaptureOutcome>,
}

impl CaptureCompletion {
    pub async fn wait(self) -> Option<CaptureOutcome> {
        self.receiver.await.ok()
    }
}

/// A completed gesture that still has to run through the capture pipeline.
pub struct CaptureJob {
    region: SelectionRectangle,
    completion: oneshot::Sender<CaptureOutcome>,
}

impl std::fmt::Debug for CaptureJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureJob").field("region", &self.region).finish()
    }
}

impl CaptureJob {
    pub fn region(&self) -> SelectionRectangle {
        self.region
    }

    pub async fn execute(self, pipeline: &CapturePipeline, engine_config: &EngineConfig) {
        let outcome = pipeline.run(&self.region, engine_config).await;

        if let Err(error) = &outcome {
            log::error!("{} Capture pipeline failed: {}", LOG_TAG_OVERLAY, error);
        }

        if self.completion.send(outcome).is_err() {
            log::warn!("{} Capture finished but nobody is waiting for it", LOG_TAG_OVERLAY);
        }
    }
}

/// Pointer-gesture state of the full-screen selection surface.
pub struct CaptureOverlay {
    state: OverlayState,
    start: Option<OverlayPoint>,
    end: Option<OverlayPoint>,
    display_offset: ScreenOffset,
    completion: Option<oneshot::Sender<CaptureOutcome>>,
}

impl CaptureOverlay {
    pub fn open(display_offset: ScreenOffset) -> (Self, CaptureCompletion) {
        log::debug!(
            "{} Opening overlay with display offset ({}, {})",
            LOG_TAG_OVERLAY,
            display_offset.dx,
            display_offset.dy
        );

        let (sender, receiver) = oneshot::channel();
        let overlay = Self {
            state: OverlayState::Idle,
            start: None,
            end: None,
            display_offset,
            completion: Some(sender),
        };

        (overlay, CaptureCompletion { receiver })
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn last_pointer(&self) -> Option<OverlayPoint> {
        self.end
    }

    pub fn on_pressed(&mut self, point: OverlayPoint) {
        if !self.accepts_input() {
            return;
        }

        self.start = Some(point);
        self.end = Some(point);
        self.state = OverlayState::Dragging;
    }

    /// Returns whether the outline needs a redraw.
    pub fn on_moved(&mut self, point: OverlayPoint) -> bool {
        if self.state != OverlayState::Dragging {
            return false;
        }

        self.end = Some(point);
        true
    }

    /// Ends the gesture. Returns the capture to run, or `None` when there was
    /// no press to anchor the selection; in that case the session is closed
    /// and its completion resolves to `None`.
    pub fn on_released(&mut self, point: OverlayPoint) -> Option<CaptureJob> {
        if !self.accepts_input() {
            return None;
        }

        self.end = Some(point);
        self.state = OverlayState::Completed;

        let Some(start) = self.start else {
            log::debug!("{} Release without press, ignoring gesture", LOG_TAG_OVERLAY);
            self.close();
            return None;
        };

        let completion = self.completion.take()?;
        let region = SelectionRectangle::between(start, point).to_global(self.display_offset);

        log::info!(
            "{} Selection complete: {}x{} at ({}, {})",
            LOG_TAG_OVERLAY,
            region.width(),
            region.height(),
            region.left(),
            region.top()
        );

        Some(CaptureJob { region, completion })
    }

    /// Normalized outline in overlay-local coordinates while dragging.
    pub fn selection_outline(&self) -> Option<SelectionRectangle> {
        if self.state != OverlayState::Dragging {
            return None;
        }

        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(SelectionRectangle::between(start, end).normalized()),
            _ => None,
        }
    }

    pub fn close(&mut self) {
        if self.state != OverlayState::Closed {
            log::debug!("{} Overlay closed", LOG_TAG_OVERLAY);
        }
        self.state = OverlayState::Closed;
        self.completion = None;
    }

    fn accepts_input(&self) -> bool {
        matches!(self.state, OverlayState::Idle | OverlayState::Dragging)
    }
}
