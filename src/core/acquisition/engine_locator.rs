use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::interfaces::adapters::EngineResolver;
use crate::core::interfaces::ports::EngineProbe;
use crate::core::models::EngineLocation;
use crate::global_constants::{ENGINE_PROGRAM_NAME, LOG_TAG_LOCATOR, WELL_KNOWN_ENGINE_PATHS};

/// Looks for the engine in a fixed order: the explicit path, then the
/// executable search path, then the well-known install locations.
pub struct EngineLocator {
    probe: Arc<dyn EngineProbe>,
    program_name: String,
    well_known_paths: Vec<PathBuf>,
}

impl EngineLocator {
    pub fn build(probe: Arc<dyn EngineProbe>) -> Self {
        Self::with_well_known_paths(
            probe,
            ENGINE_PROGRAM_NAME,
            WELL_KNOWN_ENGINE_PATHS.iter().map(PathBuf::from).collect(),
        )
    }

    pub fn with_well_known_paths(
        probe: Arc<dyn EngineProbe>,
        program_name: &str,
        well_known_paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            probe,
            program_name: program_name.to_string(),
            well_known_paths,
        }
    }
}

impl EngineResolver for EngineLocator {
    fn resolve(&self, candidate: Option<&Path>) -> EngineLocation {
        if let Some(candidate) = candidate {
            if self.probe.exists(candidate) {
                log::info!("{} Using configured engine at {:?}", LOG_TAG_LOCATOR, candidate);
                return EngineLocation::resolved(candidate.to_path_buf());
            }
            log::debug!("{} Configured engine {:?} does not exist", LOG_TAG_LOCATOR, candidate);
        }

        if let Some(found) = self.probe.find_on_search_path(&self.program_name) {
            log::info!("{} Found {} on search path at {:?}", LOG_TAG_LOCATOR, self.program_name, found);
            return EngineLocation::resolved(found);
        }

        if let Some(well_known) = self.well_known_paths.iter().find(|path| self.probe.exists(path)) {
            log::info!("{} Found engine at well-known location {:?}", LOG_TAG_LOCATOR, well_known);
            return EngineLocation::resolved(well_known.clone());
        }

        log::warn!("{} No usable {} executable found", LOG_TAG_LOCATOR, self.program_name);
        EngineLocation::unresolved()
    }
}
