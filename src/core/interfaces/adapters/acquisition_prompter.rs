use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::errors::InstallError;
use crate::core::models::AcquisitionChoice;

/// User-facing side of the acquisition workflow.
#[async_trait]
pub trait AcquisitionPrompter: Send {
    async fn choose_action(&mut self) -> AcquisitionChoice;

    async fn pick_engine_path(&mut self) -> Option<PathBuf>;

    async fn confirm_installer_launched(&mut self);

    async fn report_install_failure(&mut self, error: &InstallError);

    async fn report_engine_missing(&mut self);
}
