mod acquisition_prompter;
mod clipboard_writer;
mod engine_installer;
mod engine_resolver;
mod recognition_engine;

pub use acquisition_prompter::AcquisitionPrompter;
pub use clipboard_writer::ClipboardWriter;
pub use engine_installer::EngineInstaller;
pub use engine_resolver::EngineResolver;
pub use recognition_engine::RecognitionEngine;
