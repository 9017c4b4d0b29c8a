use std::path::PathBuf;

use async_trait::async_trait;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

use crate::core::errors::InstallError;
use crate::core::interfaces::adapters::AcquisitionPrompter;
use crate::core::models::AcquisitionChoice;
use crate::global_constants::{
    DIALOG_BUTTON_CANCEL, DIALOG_BUTTON_DOWNLOAD, DIALOG_BUTTON_SELECT,
    DIALOG_DOWNLOAD_FAILED_TITLE, DIALOG_ENGINE_MISSING_TEXT, DIALOG_ENGINE_MISSING_TITLE,
    DIALOG_ENGINE_NOT_FOUND_TEXT, DIALOG_ENGINE_NOT_FOUND_TITLE, DIALOG_INSTALLER_LAUNCHED_TEXT,
    DIALOG_INSTALLER_LAUNCHED_TITLE, DIALOG_PICK_ENGINE_TITLE, LOG_TAG_ACQUISITION,
};

/// Native message boxes and file pickers for the acquisition workflow.
#[derive(Default)]
pub struct DialogAcquisitionPrompter;

impl DialogAcquisitionPrompter {
    pub fn new() -> Self {
        Self
    }

    fn map_choice(result: &MessageDialogResult) -> AcquisitionChoice {
        match result {
            MessageDialogResult::Yes => AcquisitionChoice::SelectManually,
            MessageDialogResult::No => AcquisitionChoice::DownloadAndInstall,
            MessageDialogResult::Custom(label) if label == DIALOG_BUTTON_SELECT => {
                AcquisitionChoice::SelectManually
            }
            MessageDialogResult::Custom(label) if label == DIALOG_BUTTON_DOWNLOAD => {
                AcquisitionChoice::DownloadAndInstall
            }
            _ => AcquisitionChoice::Cancel,
        }
    }

    async fn show_message(level: MessageLevel, title: &str, description: &str) {
        AsyncMessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(description)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    }
}

/// Lets the user browse for the engine executable.
pub async fn pick_engine_executable() -> Option<PathBuf> {
    let dialog = AsyncFileDialog::new().set_title(DIALOG_PICK_ENGINE_TITLE);
    #[cfg(target_os = "windows")]
    let dialog = dialog.add_filter("Executables", &["exe"]);

    dialog
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

#[async_trait]
impl AcquisitionPrompter for DialogAcquisitionPrompter {
    async fn choose_action(&mut self) -> AcquisitionChoice {
        let result = AsyncMessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(DIALOG_ENGINE_NOT_FOUND_TITLE)
            .set_description(DIALOG_ENGINE_NOT_FOUND_TEXT)
            .set_buttons(MessageButtons::YesNoCancelCustom(
                DIALOG_BUTTON_SELECT.to_string(),
                DIALOG_BUTTON_DOWNLOAD.to_string(),
                DIALOG_BUTTON_CANCEL.to_string(),
            ))
            .show()
            .await;

        let choice = Self::map_choice(&result);
        log::info!("{} Prompt answered with {:?}", LOG_TAG_ACQUISITION, choice);
        choice
    }

    async fn pick_engine_path(&mut self) -> Option<PathBuf> {
        pick_engine_executable().await
    }

    async fn confirm_installer_launched(&mut self) {
        Self::show_message(
            MessageLevel::Info,
            DIALOG_INSTALLER_LAUNCHED_TITLE,
            DIALOG_INSTALLER_LAUNCHED_TEXT,
        )
        .await;
    }

    async fn report_install_failure(&mut self, error: &InstallError) {
        Self::show_message(
            MessageLevel::Error,
            DIALOG_DOWNLOAD_FAILED_TITLE,
            &error.to_string(),
        )
        .await;
    }

    async fn report_engine_missing(&mut self) {
        Self::show_message(
            MessageLevel::Warning,
            DIALOG_ENGINE_MISSING_TITLE,
            DIALOG_ENGINE_MISSING_TEXT,
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_labels_map_to_choices() {
        let select = MessageDialogResult::Custom(DIALOG_BUTTON_SELECT.to_string());
        let download = MessageDialogResult::Custom(DIALOG_BUTTON_DOWNLOAD.to_string());
        let cancel = MessageDialogResult::Custom(DIALOG_BUTTON_CANCEL.to_string());

        assert_eq!(DialogAcquisitionPrompter::map_choice(&select), AcquisitionChoice::SelectManually);
        assert_eq!(
            DialogAcquisitionPrompter::map_choice(&download),
            AcquisitionChoice::DownloadAndInstall
        );
        assert_eq!(DialogAcquisitionPrompter::map_choice(&cancel), AcquisitionChoice::Cancel);
    }

    #[test]
    fn test_standard_buttons_map_to_choices() {
        assert_eq!(
            DialogAcquisitionPrompter::map_choice(&MessageDialogResult::Yes),
            AcquisitionChoice::SelectManually
        );
        assert_eq!(
            DialogAcquisitionPrompter::map_choice(&MessageDialogResult::No),
            AcquisitionChoice::DownloadAndInstall
        );
        assert_eq!(
            DialogAcquisitionPrompter::map_choice(&MessageDialogResult::Cancel),
            AcquisitionChoice::Cancel
        );
    }
}
