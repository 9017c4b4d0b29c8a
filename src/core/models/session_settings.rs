use std::path::PathBuf;
use std::time::Duration;

use crate::global_constants;

/// Settings for the running session. Nothing here is written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub capture_delay_seconds: u64,
    pub engine_path_override: Option<PathBuf>,
    pub installer_url: Option<String>,
    pub download_timeout: Duration,
    pub max_acquisition_attempts: Option<usize>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            capture_delay_seconds: 0,
            engine_path_override: None,
            installer_url: global_constants::INSTALLER_URL.map(str::to_string),
            download_timeout: Duration::from_secs(global_constants::DOWNLOAD_TIMEOUT_SECONDS),
            max_acquisition_attempts: None,
        }
    }
}

impl SessionSettings {
    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(path) = lookup(global_constants::ENV_ENGINE_PATH).filter(|value| !value.trim().is_empty()) {
            log::info!("[SETTINGS] Engine path override from environment: {}", path);
            settings.engine_path_override = Some(PathBuf::from(path.trim()));
        }

        if let Some(raw_delay) = lookup(global_constants::ENV_CAPTURE_DELAY) {
            match raw_delay.trim().parse::<u64>() {
                Ok(delay) => {
                    settings.capture_delay_seconds = Self::clamp_delay(delay);
                    log::info!(
                        "[SETTINGS] Capture delay from environment: {}s",
                        settings.capture_delay_seconds
                    );
                }
                Err(error) => {
                    log::warn!(
                        "[SETTINGS] Ignoring invalid {}={:?}: {}",
                        global_constants::ENV_CAPTURE_DELAY,
                        raw_delay,
                        error
                    );
                }
            }
        }

        settings
    }

    pub fn clamp_delay(delay_seconds: u64) -> u64 {
        delay_seconds.min(global_constants::MAX_CAPTURE_DELAY_SECONDS)
    }

    pub fn capture_delay(&self) -> Duration {
        Duration::from_secs(self.capture_delay_seconds)
    }
}
