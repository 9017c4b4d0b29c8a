use std::path::Path;

use crate::core::models::EngineLocation;

pub trait EngineResolver: Send + Sync {
    fn resolve(&self, candidate: Option<&Path>) -> EngineLocation;
}
