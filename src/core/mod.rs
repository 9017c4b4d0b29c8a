pub mod acquisition;
pub mod capture_overlay;
pub mod capture_pipeline;
pub mod errors;
pub mod interfaces;
pub mod models;
pub mod orchestrators;
