use async_trait::async_trait;

use crate::core::errors::InstallError;
use crate::core::models::{DownloadCancellation, ProgressSink};

#[async_trait]
pub trait EngineInstaller: Send + Sync {
    /// Downloads the installer and starts it without waiting for it to exit.
    async fn download_and_install(
        &self,
        progress: &ProgressSink,
        cancellation: &DownloadCancellation,
    ) -> Result<(), InstallError>;
}
