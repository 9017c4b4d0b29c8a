use std::path::{Path, PathBuf};

/// Path of a usable recognition engine executable, or unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineLocation(Option<PathBuf>);

impl EngineLocation {
    pub fn resolved(path: PathBuf) -> Self {
        Self(Some(path))
    }

    pub fn unresolved() -> Self {
        Self(None)
    }

    pub fn path(&self) -> Option<&Path> {
        self.0.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.is_some()
    }

    pub fn into_path(self) -> Option<PathBuf> {
        self.0
    }
}

/// Engine settings owned by the shell and handed to each capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    location: EngineLocation,
}

impl EngineConfig {
    pub fn location(&self) -> &EngineLocation {
        &self.location
    }

    pub fn set_engine_path(&mut self, path: PathBuf) {
        log::info!("[ENGINE_CONFIG] Engine path set to {:?}", path);
        self.location = EngineLocation::resolved(path);
    }

    pub fn clear(&mut self) {
        self.location = EngineLocation::unresolved();
    }
}

/// Terminal result of the acquisition workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    Ready(PathBuf),
    UserCancelled,
    StillMissing,
}

/// What the user picked when no engine could be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionChoice {
    SelectManually,
    DownloadAndInstall,
    Cancel,
}
