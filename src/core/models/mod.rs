mod capture_buffer;
mod capture_result;
mod download;
mod engine;
mod selection;
mod session_settings;

pub use capture_buffer::CaptureBuffer;
pub use capture_result::CaptureResult;
pub use download::{DownloadCancellation, DownloadProgress, ProgressSink};
pub use engine::{AcquisitionChoice, AcquisitionOutcome, EngineConfig, EngineLocation};
pub use selection::{DisplayGeometry, OverlayPoint, ScreenOffset, SelectionRectangle};
pub use session_settings::SessionSettings;
