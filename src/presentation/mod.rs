pub mod app_theme;
mod capture_overlay_view;

pub use capture_overlay_view::{CaptureOverlayView, CaptureOverlayViewMessage, OverlayViewOutcome};
