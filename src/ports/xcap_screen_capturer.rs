use anyhow::{Context, Result};

use crate::core::interfaces::ports::ScreenCapturer;
use crate::core::models::{CaptureBuffer, DisplayGeometry, ScreenOffset, SelectionRectangle};
use crate::global_constants::{
    ERROR_CONTEXT_CAPTURE_MONITOR, ERROR_CONTEXT_LIST_MONITORS, ERROR_CONTEXT_SCALE_FACTOR,
    LOG_TAG_CAPTURE,
};

/// Pixel rectangle inside a monitor image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelCrop {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

pub struct XcapScreenCapturer;

impl XcapScreenCapturer {
    pub fn initialize() -> Self {
        log::debug!("{} initializing xcap screen capturer", LOG_TAG_CAPTURE);
        Self
    }

    fn find_primary_monitor(&self) -> Result<xcap::Monitor> {
        let monitors = xcap::Monitor::all().with_context(|| ERROR_CONTEXT_LIST_MONITORS)?;
        let mut fallback = None;

        for monitor in monitors {
            if monitor.is_primary().unwrap_or(false) {
                return Ok(monitor);
            }
            fallback.get_or_insert(monitor);
        }

        fallback.context("no monitors attached")
    }

    fn get_monitor_at_position(&self, region: &SelectionRectangle) -> Result<xcap::Monitor> {
        xcap::Monitor::from_point(region.left(), region.top()).with_context(|| {
            format!(
                "failed to find monitor at ({}, {})",
                region.left(),
                region.top()
            )
        })
    }

    fn extract_scale_factor_from_monitor(&self, monitor: &xcap::Monitor) -> Result<f32> {
        let scale_factor = monitor
            .scale_factor()
            .with_context(|| ERROR_CONTEXT_SCALE_FACTOR)?;

        log::debug!("{} monitor scale factor: {}", LOG_TAG_CAPTURE, scale_factor);
        Ok(scale_factor)
    }

    fn extract_monitor_origin(&self, monitor: &xcap::Monitor) -> Result<ScreenOffset> {
        Ok(ScreenOffset {
            dx: monitor.x().context("monitor x position")?,
            dy: monitor.y().context("monitor y position")?,
        })
    }

    fn capture_monitor_image(&self, monitor: &xcap::Monitor) -> Result<CaptureBuffer> {
        let image = monitor
            .capture_image()
            .with_context(|| ERROR_CONTEXT_CAPTURE_MONITOR)?;

        log::debug!(
            "{} captured {}x{} monitor image",
            LOG_TAG_CAPTURE,
            image.width(),
            image.height()
        );
        Ok(CaptureBuffer::from_rgba_image(image))
    }

    /// xcap reports points on macOS and physical pixels elsewhere.
    fn logical_size(width: u32, height: u32, scale_factor: f32) -> (u32, u32) {
        if cfg!(target_os = "macos") || scale_factor <= 0.0 {
            return (width, height);
        }
        (
            (width as f32 / scale_factor).round() as u32,
            (height as f32 / scale_factor).round() as u32,
        )
    }

    /// Maps a global logical region onto the physical pixels of a monitor
    /// image whose top-left corner sits at `monitor_origin`.
    fn crop_for_monitor(
        region: &SelectionRectangle,
        monitor_origin: ScreenOffset,
        scale_factor: f32,
    ) -> PixelCrop {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let to_pixels = |logical: i32| ((logical.max(0) as f32) * scale).round() as u32;

        PixelCrop {
            x: to_pixels(region.left() - monitor_origin.dx),
            y: to_pixels(region.top() - monitor_origin.dy),
            width: ((region.width() as f32) * scale).round() as u32,
            height: ((region.height() as f32) * scale).round() as u32,
        }
    }
}

impl ScreenCapturer for XcapScreenCapturer {
    fn primary_display(&self) -> Result<DisplayGeometry> {
        let monitor = self.find_primary_monitor()?;
        let scale_factor = self.extract_scale_factor_from_monitor(&monitor)?;
        let (width, height) = Self::logical_size(
            monitor.width().context("monitor width")?,
            monitor.height().context("monitor height")?,
            scale_factor,
        );
        let geometry = DisplayGeometry {
            origin: self.extract_monitor_origin(&monitor)?,
            width,
            height,
            scale_factor,
        };

        log::info!("{} primary display {:?}", LOG_TAG_CAPTURE, geometry);
        Ok(geometry)
    }

    fn capture_screen_region(&self, region: &SelectionRectangle) -> Result<CaptureBuffer> {
        if region.is_empty() {
            log::debug!("{} zero-area region, returning empty image", LOG_TAG_CAPTURE);
            return Ok(CaptureBuffer::empty());
        }

        let monitor = self.get_monitor_at_position(region)?;
        let origin = self.extract_monitor_origin(&monitor)?;
        let scale_factor = self.extract_scale_factor_from_monitor(&monitor)?;
        let crop = Self::crop_for_monitor(region, origin, scale_factor);

        log::info!(
            "{} capturing {:?} from monitor at ({}, {})",
            LOG_TAG_CAPTURE,
            crop,
            origin.dx,
            origin.dy
        );

        let monitor_image = self.capture_monitor_image(&monitor)?;
        Ok(monitor_image.crop_region(crop.x, crop.y, crop.width, crop.height))
    }
}
