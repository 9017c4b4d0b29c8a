mod arboard_clipboard_writer;
mod dialog_acquisition_prompter;
mod http_engine_installer;
mod tesseract_recognition_engine;

pub use arboard_clipboard_writer::ArboardClipboardWriter;
pub use dialog_acquisition_prompter::{pick_engine_executable, DialogAcquisitionPrompter};
pub use http_engine_installer::HttpEngineInstaller;
pub use tesseract_recognition_engine::TesseractRecognitionEngine;
