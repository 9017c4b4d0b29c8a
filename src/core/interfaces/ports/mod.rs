mod engine_probe;
mod screen_capturer;

pub use engine_probe::EngineProbe;
pub use screen_capturer::ScreenCapturer;
