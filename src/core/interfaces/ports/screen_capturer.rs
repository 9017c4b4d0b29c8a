use anyhow::Result;

use crate::core::models::{CaptureBuffer, DisplayGeometry, SelectionRectangle};

pub trait ScreenCapturer: Send + Sync {
    fn primary_display(&self) -> Result<DisplayGeometry>;

    /// `region` is normalized and in global screen coordinates.
    fn capture_screen_region(&self, region: &SelectionRectangle) -> Result<CaptureBuffer>;
}
