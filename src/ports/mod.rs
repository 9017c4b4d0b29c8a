mod filesystem_engine_probe;
mod xcap_screen_capturer;

pub use filesystem_engine_probe::FilesystemEngineProbe;
pub use xcap_screen_capturer::XcapScreenCapturer;
