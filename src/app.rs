use std::sync::Arc;

use iced::window::Id;
use iced::{Color, Element, Task, Theme};

use crate::adapters::{ArboardClipboardWriter, HttpEngineInstaller, TesseractRecognitionEngine};
use crate::core::acquisition::{AcquisitionWorkflow, EngineLocator};
use crate::core::capture_pipeline::CapturePipeline;
use crate::core::models::SessionSettings;
use crate::core::orchestrators::app_orchestrator::{AppOrchestrator, OrchestratorMessage};
use crate::ports::{FilesystemEngineProbe, XcapScreenCapturer};

pub struct SnipApp {
    orchestrator: AppOrchestrator,
}

impl SnipApp {
    pub fn build() -> (Self, Task<OrchestratorMessage>) {
        log::info!("[APP] Initializing application");

        let settings = SessionSettings::from_environment();
        log::debug!("[APP] Session settings: {:?}", settings);

        let capture_pipeline = CapturePipeline::build(
            Arc::new(XcapScreenCapturer::initialize()),
            Arc::new(TesseractRecognitionEngine::build()),
        );

        let acquisition_workflow = Arc::new(AcquisitionWorkflow::build(
            Arc::new(EngineLocator::build(Arc::new(FilesystemEngineProbe::initialize()))),
            Arc::new(HttpEngineInstaller::build(
                settings.installer_url.clone(),
                settings.download_timeout,
            )),
            settings.max_acquisition_attempts,
        ));

        let orchestrator = AppOrchestrator::build(
            capture_pipeline,
            acquisition_workflow,
            Arc::new(ArboardClipboardWriter::new()),
            settings,
        );

        (
            Self { orchestrator },
            Task::batch(vec![
                Task::done(OrchestratorMessage::OpenMainWindow),
                Task::done(OrchestratorMessage::EnsureEngineReady),
            ]),
        )
    }

    pub fn handle_update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        self.orchestrator.update(message)
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        self.orchestrator.render_view(window_id)
    }

    /// Windows are transparent by default so the capture overlay only shows
    /// its own dim layer; the main window paints its own background.
    pub fn handle_style(&self, theme: &Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: Color::TRANSPARENT,
            text_color: theme.palette().text,
        }
    }

    pub fn handle_subscription(&self) -> iced::Subscription<OrchestratorMessage> {
        use iced::window;

        iced::event::listen_with(|event, _status, id| {
            if let iced::Event::Window(window::Event::Closed) = event {
                return Some(OrchestratorMessage::WindowClosed(id));
            }
            None
        })
    }
}
