mod acquisition_workflow;
mod download_stream;
mod engine_locator;

pub use acquisition_workflow::AcquisitionWorkflow;
pub use download_stream::stream_to_writer;
pub use engine_locator::EngineLocator;
