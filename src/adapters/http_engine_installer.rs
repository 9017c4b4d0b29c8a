use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::acquisition::stream_to_writer;
use crate::core::errors::InstallError;
use crate::core::interfaces::adapters::EngineInstaller;
use crate::core::models::{DownloadCancellation, ProgressSink};
use crate::global_constants::{INSTALLER_FILE_SUFFIX, LOG_TAG_INSTALLER};

/// Fetches the engine installer over HTTPS and launches it.
pub struct HttpEngineInstaller {
    installer_url: Option<String>,
    timeout: Duration,
}

impl HttpEngineInstaller {
    pub fn build(installer_url: Option<String>, timeout: Duration) -> Self {
        Self {
            installer_url,
            timeout,
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, InstallError> {
        reqwest::Client::builder()
            .connect_timeout(self.timeout)
            .read_timeout(self.timeout)
            .build()
            .map_err(|error| InstallError::DownloadFailed(error.to_string()))
    }

    async fn download_installer(
        &self,
        url: &str,
        progress: &ProgressSink,
        cancellation: &DownloadCancellation,
    ) -> Result<PathBuf, InstallError> {
        log::info!("{} Downloading installer from {}", LOG_TAG_INSTALLER, url);

        let response = self
            .build_client()?
            .get(url)
            .send()
            .await
            .map_err(|error| InstallError::DownloadFailed(error.to_string()))?;

        if !response.status().is_success() {
            return Err(InstallError::DownloadFailed(format!(
                "server responded with {}",
                response.status()
            )));
        }

        let total_bytes = response.content_length();
        let (file, path) = tempfile::Builder::new()
            .prefix("tesseract-installer-")
            .suffix(INSTALLER_FILE_SUFFIX)
            .tempfile()
            .and_then(|file| file.keep().map_err(|error| error.error))
            .map_err(|error| InstallError::DownloadFailed(format!("temporary file: {}", error)))?;

        let mut destination = tokio::fs::File::from_std(file);
        let result = stream_to_writer(
            Box::pin(response.bytes_stream()),
            total_bytes,
            &mut destination,
            progress,
            cancellation,
        )
        .await;
        drop(destination);

        if let Err(error) = result {
            Self::discard_partial_download(&path).await;
            return Err(error);
        }

        Ok(path)
    }

    async fn discard_partial_download(path: &Path) {
        if let Err(error) = tokio::fs::remove_file(path).await {
            log::warn!(
                "{} Could not remove partial download {:?}: {}",
                LOG_TAG_INSTALLER,
                path,
                error
            );
        }
    }

    fn launch_installer(path: &Path) -> Result<(), InstallError> {
        log::info!("{} Launching installer {:?}", LOG_TAG_INSTALLER, path);
        open::that(path).map_err(|error| InstallError::InstallerLaunchFailed(error.to_string()))
    }
}

#[async_trait]
impl EngineInstaller for HttpEngineInstaller {
    async fn download_and_install(
        &self,
        progress: &ProgressSink,
        cancellation: &DownloadCancellation,
    ) -> Result<(), InstallError> {
        let Some(url) = self.installer_url.as_deref() else {
            log::warn!("{} No installer available for this platform", LOG_TAG_INSTALLER);
            return Err(InstallError::UnsupportedPlatform);
        };

        let installer_path = self.download_installer(url, progress, cancellation).await?;
        Self::launch_installer(&installer_path)
    }
}
