use thiserror::Error;

/// The recognition engine could not produce text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("OCR unavailable: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),
}

/// Failures of the capture pipeline after a valid gesture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Display error: {0}")]
    Display(String),

    #[error("Screen capture failed: {0}")]
    ScreenCapture(String),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),
}

/// Failures of the download-and-install procedure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    #[error("Download cancelled by user")]
    DownloadCancelled,

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Could not launch installer: {0}")]
    InstallerLaunchFailed(String),

    #[error("No installer is available for this platform")]
    UnsupportedPlatform,
}

impl InstallError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, InstallError::DownloadCancelled)
    }
}
