use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use iced::widget::{button, column, container, pick_list, progress_bar, row, text, text_editor, Space};
use iced::window::{self, Id};
use iced::{Alignment, Background, Color, Element, Length, Point, Size, Task};

use crate::adapters::{pick_engine_executable, DialogAcquisitionPrompter};
use crate::core::acquisition::AcquisitionWorkflow;
use crate::core::capture_overlay::{CaptureOutcome, CaptureOverlay};
use crate::core::capture_pipeline::CapturePipeline;
use crate::core::errors::CaptureError;
use crate::core::interfaces::adapters::{AcquisitionPrompter, ClipboardWriter};
use crate::core::models::{
    AcquisitionOutcome, DownloadCancellation, DownloadProgress, EngineConfig, SessionSettings,
};
use crate::global_constants::{
    APPLICATION_TITLE, CAPTURE_DELAY_CHOICES, NO_TEXT_FOUND, TEXT_AREA_PLACEHOLDER,
    WINDOW_SETTLE_MILLISECONDS,
};
use crate::presentation::app_theme;
use crate::presentation::{CaptureOverlayView, CaptureOverlayViewMessage, OverlayViewOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnipMode {
    Rectangular,
}

impl SnipMode {
    const ALL: [SnipMode; 1] = [SnipMode::Rectangular];
}

impl std::fmt::Display for SnipMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnipMode::Rectangular => write!(f, "Rectangular"),
        }
    }
}

pub enum AppWindow {
    Main,
    CaptureOverlay(CaptureOverlayView),
}

pub struct AppOrchestrator {
    capture_pipeline: CapturePipeline,
    acquisition_workflow: Arc<AcquisitionWorkflow>,
    clipboard: Arc<dyn ClipboardWriter>,
    settings: SessionSettings,
    engine_config: EngineConfig,
    windows: HashMap<Id, AppWindow>,
    main_window_id: Option<Id>,
    snip_mode: SnipMode,
    text_content: text_editor::Content,
    status: String,
    capture_in_progress: bool,
    acquisition_in_progress: bool,
    download_progress: Option<DownloadProgress>,
    download_cancellation: DownloadCancellation,
}

#[derive(Clone)]
pub enum OrchestratorMessage {
    OpenMainWindow,
    EnsureEngineReady,
    AcquisitionProgress(DownloadProgress),
    CancelDownload,
    AcquisitionFinished(AcquisitionOutcome),
    StartSnip,
    LaunchOverlay,
    CaptureOverlayMessage(Id, CaptureOverlayViewMessage),
    CaptureFinished(Option<CaptureOutcome>),
    ModeSelected(SnipMode),
    DelaySelected(u64),
    TextEdited(text_editor::Action),
    CopyText,
    PickEnginePath,
    EnginePathPicked(Option<PathBuf>),
    WindowClosed(Id),
}

impl std::fmt::Debug for OrchestratorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorMessage::OpenMainWindow => write!(f, "OpenMainWindow"),
            OrchestratorMessage::EnsureEngineReady => write!(f, "EnsureEngineReady"),
            OrchestratorMessage::AcquisitionProgress(progress) => {
                write!(f, "AcquisitionProgress({:?})", progress)
            }
            OrchestratorMessage::CancelDownload => write!(f, "CancelDownload"),
            OrchestratorMessage::AcquisitionFinished(outcome) => {
                write!(f, "AcquisitionFinished({:?})", outcome)
            }
            OrchestratorMessage::StartSnip => write!(f, "StartSnip"),
            OrchestratorMessage::LaunchOverlay => write!(f, "LaunchOverlay"),
            OrchestratorMessage::CaptureOverlayMessage(id, message) => {
                write!(f, "CaptureOverlayMessage({:?}, {:?})", id, message)
            }
            OrchestratorMessage::CaptureFinished(outcome) => match outcome {
                None => write!(f, "CaptureFinished(aborted)"),
                Some(Ok(result)) => write!(
                    f,
                    "CaptureFinished(Ok, {} characters)",
                    result.recognized_text.chars().count()
                ),
                Some(Err(error)) => write!(f, "CaptureFinished(Err({}))", error),
            },
            OrchestratorMessage::ModeSelected(mode) => write!(f, "ModeSelected({})", mode),
            OrchestratorMessage::DelaySelected(delay) => write!(f, "DelaySelected({})", delay),
            OrchestratorMessage::TextEdited(_) => write!(f, "TextEdited"),
            OrchestratorMessage::CopyText => write!(f, "CopyText"),
            OrchestratorMessage::PickEnginePath => write!(f, "PickEnginePath"),
            OrchestratorMessage::EnginePathPicked(path) => {
                write!(f, "EnginePathPicked({:?})", path)
            }
            OrchestratorMessage::WindowClosed(id) => write!(f, "WindowClosed({:?})", id),
        }
    }
}

/// Text shown in the result area for a finished capture.
pub fn present_capture_outcome(outcome: &CaptureOutcome) -> String {
    match outcome {
        Ok(result) if result.has_text() => result.recognized_text.clone(),
        Ok(_) => NO_TEXT_FOUND.to_string(),
        Err(error) => error.to_string(),
    }
}

impl AppOrchestrator {
    pub fn build(
        capture_pipeline: CapturePipeline,
        acquisition_workflow: Arc<AcquisitionWorkflow>,
        clipboard: Arc<dyn ClipboardWriter>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            capture_pipeline,
            acquisition_workflow,
            clipboard,
            settings,
            engine_config: EngineConfig::default(),
            windows: HashMap::new(),
            main_window_id: None,
            snip_mode: SnipMode::Rectangular,
            text_content: text_editor::Content::new(),
            status: "Checking for Tesseract...".to_string(),
            capture_in_progress: false,
            acquisition_in_progress: false,
            download_progress: None,
            download_cancellation: DownloadCancellation::new(),
        }
    }

    pub fn update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        log::debug!("[ORCHESTRATOR] Received message: {:?}", message);

        match message {
            OrchestratorMessage::OpenMainWindow => self.handle_open_main_window(),
            OrchestratorMessage::EnsureEngineReady => self.handle_ensure_engine_ready(),
            OrchestratorMessage::AcquisitionProgress(progress) => {
                self.handle_acquisition_progress(progress);
                Task::none()
            }
            OrchestratorMessage::CancelDownload => {
                log::info!("[ORCHESTRATOR] Download cancellation requested");
                self.download_cancellation.cancel();
                self.status = "Cancelling download...".to_string();
                Task::none()
            }
            OrchestratorMessage::AcquisitionFinished(outcome) => {
                self.handle_acquisition_finished(outcome);
                Task::none()
            }
            OrchestratorMessage::StartSnip => self.handle_start_snip(),
            OrchestratorMessage::LaunchOverlay => self.handle_launch_overlay(),
            OrchestratorMessage::CaptureOverlayMessage(window_id, overlay_message) => {
                self.handle_capture_overlay_message(window_id, overlay_message)
            }
            OrchestratorMessage::CaptureFinished(outcome) => self.handle_capture_finished(outcome),
            OrchestratorMessage::ModeSelected(mode) => {
                self.snip_mode = mode;
                Task::none()
            }
            OrchestratorMessage::DelaySelected(delay) => {
                self.settings.capture_delay_seconds = SessionSettings::clamp_delay(delay);
                log::info!(
                    "[ORCHESTRATOR] Capture delay set to {}s",
                    self.settings.capture_delay_seconds
                );
                Task::none()
            }
            OrchestratorMessage::TextEdited(action) => {
                self.text_content.perform(action);
                Task::none()
            }
            OrchestratorMessage::CopyText => {
                self.handle_copy_text();
                Task::none()
            }
            OrchestratorMessage::PickEnginePath => Task::future(async {
                OrchestratorMessage::EnginePathPicked(pick_engine_executable().await)
            }),
            OrchestratorMessage::EnginePathPicked(path) => {
                self.handle_engine_path_picked(path);
                Task::none()
            }
            OrchestratorMessage::WindowClosed(id) => self.handle_window_closed(id),
        }
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        match self.windows.get(&window_id) {
            Some(AppWindow::Main) => self.render_main_window(),
            Some(AppWindow::CaptureOverlay(overlay_view)) => overlay_view
                .render_ui()
                .map(move |msg| OrchestratorMessage::CaptureOverlayMessage(window_id, msg)),
            None => text("Loading...").into(),
        }
    }

    pub fn can_start_capture(&self) -> bool {
        !self.capture_in_progress && !self.acquisition_in_progress
    }

    fn handle_open_main_window(&mut self) -> Task<OrchestratorMessage> {
        if let Some(id) = self.main_window_id.filter(|id| self.windows.contains_key(id)) {
            log::warn!("[ORCHESTRATOR] Main window {:?} already open", id);
            return Task::none();
        }

        let (id, task) = window::open(window::Settings {
            size: Size::new(640.0, 320.0),
            min_size: Some(Size::new(520.0, 240.0)),
            position: window::Position::Centered,
            ..Default::default()
        });

        self.main_window_id = Some(id);
        self.windows.insert(id, AppWindow::Main);
        log::info!("[ORCHESTRATOR] Main window created with ID: {:?}", id);
        task.discard()
    }

    fn configured_engine_path(&self) -> Option<PathBuf> {
        self.engine_config
            .location()
            .path()
            .map(PathBuf::from)
            .or_else(|| self.settings.engine_path_override.clone())
    }

    fn handle_ensure_engine_ready(&mut self) -> Task<OrchestratorMessage> {
        if self.acquisition_in_progress {
            log::warn!("[ORCHESTRATOR] Acquisition already running");
            return Task::none();
        }

        self.acquisition_in_progress = true;
        self.status = "Checking for Tesseract...".to_string();

        let workflow = Arc::clone(&self.acquisition_workflow);
        let configured = self.configured_engine_path();
        let cancellation = self.download_cancellation.clone();

        Task::stream(iced::stream::channel(
            16,
            move |output: mpsc::Sender<OrchestratorMessage>| async move {
                run_acquisition(
                    workflow,
                    configured,
                    DialogAcquisitionPrompter::new(),
                    cancellation,
                    output,
                )
                .await;
            },
        ))
    }

    fn handle_acquisition_progress(&mut self, progress: DownloadProgress) {
        self.download_progress = match progress {
            DownloadProgress::Started => Some(DownloadProgress::Percent(0)),
            DownloadProgress::Stopped => None,
            other => Some(other),
        };
    }

    fn handle_acquisition_finished(&mut self, outcome: AcquisitionOutcome) {
        log::info!("[ORCHESTRATOR] Acquisition finished: {:?}", outcome);
        self.acquisition_in_progress = false;
        self.download_progress = None;

        match outcome {
            AcquisitionOutcome::Ready(path) => {
                self.status = format!("Ready - using {}", path.display());
                self.engine_config.set_engine_path(path);
            }
            AcquisitionOutcome::UserCancelled | AcquisitionOutcome::StillMissing => {
                self.engine_config.clear();
                self.status = "Tesseract missing - captures will fail until it is installed".to_string();
            }
        }
    }

    /// Picks up an engine that was installed since the last check, without
    /// prompting.
    fn refresh_engine_location(&mut self) {
        if self.engine_config.location().is_resolved() {
            return;
        }

        let location = self
            .acquisition_workflow
            .resolver()
            .resolve(self.settings.engine_path_override.as_deref());
        if let Some(path) = location.into_path() {
            log::info!("[ORCHESTRATOR] Engine found on silent re-check: {:?}", path);
            self.engine_config.set_engine_path(path);
        }
    }

    fn handle_start_snip(&mut self) -> Task<OrchestratorMessage> {
        if !self.can_start_capture() {
            log::warn!("[ORCHESTRATOR] Capture requested while another run is active");
            return Task::none();
        }

        self.capture_in_progress = true;
        self.refresh_engine_location();

        let delay = self.settings.capture_delay()
            + Duration::from_millis(WINDOW_SETTLE_MILLISECONDS);
        self.status = match self.settings.capture_delay_seconds {
            0 => "Preparing to capture...".to_string(),
            seconds => format!("Capturing in {}s...", seconds),
        };
        log::info!("[ORCHESTRATOR] Hiding main window, overlay in {:?}", delay);

        Task::batch(vec![
            match self.main_window_id {
                Some(id) => window::minimize(id, true),
                None => Task::none(),
            },
            Task::future(async move {
                tokio::time::sleep(delay).await;
                OrchestratorMessage::LaunchOverlay
            }),
        ])
    }

    fn handle_launch_overlay(&mut self) -> Task<OrchestratorMessage> {
        let display = match self.capture_pipeline.screen_capturer().primary_display() {
            Ok(display) => display,
            Err(error) => {
                let error = CaptureError::Display(format!("{:#}", error));
                log::error!("[ORCHESTRATOR] {}", error);
                self.capture_in_progress = false;
                self.status = error.to_string();
                return self.restore_main_window();
            }
        };

        log::info!(
            "[ORCHESTRATOR] Primary display {}x{} at ({}, {}), scale {}",
            display.width,
            display.height,
            display.origin.dx,
            display.origin.dy,
            display.scale_factor
        );
        let (overlay, completion) = CaptureOverlay::open(display.origin);
        let (id, task) = window::open(window::Settings {
            position: window::Position::Specific(Point::new(
                display.origin.dx as f32,
                display.origin.dy as f32,
            )),
            size: Size::new(display.width as f32, display.height as f32),
            transparent: true,
            decorations: false,
            resizable: false,
            level: window::Level::AlwaysOnTop,
            ..Default::default()
        });

        self.windows.insert(
            id,
            AppWindow::CaptureOverlay(CaptureOverlayView::build_with_overlay(overlay)),
        );
        self.status = "Drag to select a region, Esc to cancel".to_string();
        log::info!("[ORCHESTRATOR] Overlay window created with ID: {:?}", id);

        Task::batch(vec![
            task.discard().chain(window::gain_focus(id)),
            Task::future(async move { OrchestratorMessage::CaptureFinished(completion.wait().await) }),
        ])
    }

    fn handle_capture_overlay_message(
        &mut self,
        window_id: Id,
        overlay_message: CaptureOverlayViewMessage,
    ) -> Task<OrchestratorMessage> {
        let Some(AppWindow::CaptureOverlay(overlay_view)) = self.windows.get_mut(&window_id) else {
            log::warn!("[ORCHESTRATOR] Overlay window {:?} not found", window_id);
            return Task::none();
        };

        match overlay_view.update(overlay_message) {
            OverlayViewOutcome::KeepOpen => Task::none(),
            OverlayViewOutcome::Dismiss(None) => window::close(window_id),
            OverlayViewOutcome::Dismiss(Some(job)) => {
                log::info!("[ORCHESTRATOR] Running capture for {:?}", job.region());
                self.status = "Recognizing text...".to_string();

                let pipeline = self.capture_pipeline.clone();
                let engine_config = self.engine_config.clone();
                let settle = Duration::from_millis(WINDOW_SETTLE_MILLISECONDS);

                Task::batch(vec![
                    window::close(window_id),
                    Task::future(async move {
                        tokio::time::sleep(settle).await;
                        job.execute(&pipeline, &engine_config).await;
                    })
                    .discard(),
                ])
            }
        }
    }

    fn handle_capture_finished(&mut self, outcome: Option<CaptureOutcome>) -> Task<OrchestratorMessage> {
        self.capture_in_progress = false;

        match outcome {
            None => {
                log::info!("[ORCHESTRATOR] Capture aborted");
                self.status = "Capture cancelled".to_string();
            }
            Some(outcome) => {
                self.text_content = text_editor::Content::with_text(&present_capture_outcome(&outcome));

                match &outcome {
                    Ok(result) => {
                        log::info!(
                            "[ORCHESTRATOR] Recognized {} characters from a {}x{} capture",
                            result.recognized_text.chars().count(),
                            result.image.width,
                            result.image.height
                        );
                        self.status = if result.has_text() {
                            "Text copied to clipboard".to_string()
                        } else {
                            "No text found".to_string()
                        };
                        if let Err(error) = self.clipboard.write_text(&result.recognized_text) {
                            log::error!("[ORCHESTRATOR] Clipboard write failed: {:#}", error);
                            self.status = format!("Clipboard error: {}", error);
                        }
                    }
                    Err(error) => {
                        log::error!("[ORCHESTRATOR] Capture failed: {}", error);
                        self.status = "Capture failed".to_string();
                    }
                }
            }
        }

        self.restore_main_window()
    }

    fn restore_main_window(&self) -> Task<OrchestratorMessage> {
        match self.main_window_id {
            Some(id) => window::minimize(id, false).chain(window::gain_focus(id)),
            None => Task::none(),
        }
    }

    fn handle_copy_text(&mut self) {
        let contents = self.text_content.text();
        match self.clipboard.write_text(&contents) {
            Ok(()) => self.status = "Text copied to clipboard".to_string(),
            Err(error) => {
                log::error!("[ORCHESTRATOR] Clipboard write failed: {:#}", error);
                self.status = format!("Clipboard error: {}", error);
            }
        }
    }

    fn handle_engine_path_picked(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            log::debug!("[ORCHESTRATOR] Engine selection dismissed");
            return;
        };

        self.status = format!("Using: {}", path.display());
        self.settings.engine_path_override = Some(path.clone());
        self.engine_config.set_engine_path(path);
    }

    fn handle_window_closed(&mut self, id: Id) -> Task<OrchestratorMessage> {
        log::info!("[ORCHESTRATOR] Window closed: {:?}", id);

        if Some(id) == self.main_window_id {
            log::info!("[ORCHESTRATOR] Main window closed, exiting");
            self.windows.remove(&id);
            self.main_window_id = None;
            return iced::exit();
        }

        if let Some(AppWindow::CaptureOverlay(mut overlay_view)) = self.windows.remove(&id) {
            log::debug!(
                "[ORCHESTRATOR] Overlay closed in state {:?}",
                overlay_view.overlay_state()
            );
            overlay_view.abandon();
        }
        Task::none()
    }

    fn render_main_window(&self) -> Element<'_, OrchestratorMessage> {
        let theme = app_theme::get_theme();

        let title = text(APPLICATION_TITLE).size(18);

        let new_button = button(text("New"))
            .padding([6, 18])
            .style(|theme, status| app_theme::primary_button_style(theme, status))
            .on_press_maybe(self.can_start_capture().then_some(OrchestratorMessage::StartSnip));

        let mode_picker = pick_list(
            &SnipMode::ALL[..],
            Some(self.snip_mode),
            OrchestratorMessage::ModeSelected,
        );

        let delay_picker = pick_list(
            &CAPTURE_DELAY_CHOICES[..],
            Some(self.settings.capture_delay_seconds),
            OrchestratorMessage::DelaySelected,
        );

        let options_button = button(text("Options"))
            .padding([6, 12])
            .style(|theme, status| app_theme::secondary_button_style(theme, status))
            .on_press_maybe(
                (!self.acquisition_in_progress).then_some(OrchestratorMessage::PickEnginePath),
            );

        let copy_button = button(text("Copy Text"))
            .padding([6, 12])
            .style(|theme, status| app_theme::secondary_button_style(theme, status))
            .on_press(OrchestratorMessage::CopyText);

        let toolbar = row![
            title,
            Space::new().width(Length::Fill),
            new_button,
            text("Mode:").size(13),
            mode_picker,
            text("Delay (s):").size(13),
            delay_picker,
            options_button,
            copy_button,
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let text_area = text_editor(&self.text_content)
            .placeholder(TEXT_AREA_PLACEHOLDER)
            .on_action(OrchestratorMessage::TextEdited)
            .height(Length::Fill);

        let mut content = column![toolbar].spacing(10).padding(12);
        if let Some(progress) = self.download_progress {
            content = content.push(self.render_download_panel(progress));
        }
        content = content.push(text_area).push(self.render_status_indicator());

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| {
                let palette = theme.palette();
                iced::widget::container::Style {
                    background: Some(Background::Color(palette.background)),
                    text_color: Some(palette.text),
                    ..Default::default()
                }
            })
            .into()
    }

    fn render_download_panel(&self, progress: DownloadProgress) -> Element<'_, OrchestratorMessage> {
        let (value, label) = match progress {
            DownloadProgress::Percent(percent) => {
                (percent as f32, format!("Downloading Tesseract installer... {}%", percent))
            }
            DownloadProgress::Indeterminate { bytes_received } => (
                0.0,
                format!(
                    "Downloading Tesseract installer... {} KB",
                    bytes_received / 1024
                ),
            ),
            DownloadProgress::Started | DownloadProgress::Stopped => {
                (0.0, "Downloading Tesseract installer...".to_string())
            }
        };

        let cancel_button = button(text("Cancel"))
            .padding([4, 12])
            .style(|theme, status| app_theme::danger_button_style(theme, status))
            .on_press(OrchestratorMessage::CancelDownload);

        column![
            text(label).size(13),
            row![progress_bar(0.0..=100.0, value), cancel_button]
                .spacing(8)
                .align_y(Alignment::Center),
        ]
        .spacing(4)
        .into()
    }

    fn render_status_indicator(&self) -> Element<'_, OrchestratorMessage> {
        let status_color = match self.status.as_str() {
            s if s.starts_with("Ready") || s.contains("copied") => Color::from_rgb(0.2, 0.7, 0.4),
            s if s.contains("missing") || s.contains("failed") || s.contains("error") => {
                Color::from_rgb(0.85, 0.2, 0.2)
            }
            _ => Color::from_rgba(0.5, 0.5, 0.5, 1.0),
        };

        let status_text = row![
            text("●")
                .size(12)
                .style(move |_theme: &iced::Theme| iced::widget::text::Style {
                    color: Some(status_color),
                }),
            text(&self.status)
                .size(13)
                .style(|_theme: &iced::Theme| iced::widget::text::Style {
                    color: Some(Color::from_rgba(0.4, 0.4, 0.4, 1.0)),
                }),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        container(status_text).into()
    }
}

/// Runs the acquisition workflow and forwards every progress event, in order,
/// before the final outcome. Progress is queued without a bound so the
/// download never waits on the UI.
async fn run_acquisition<P: AcquisitionPrompter>(
    workflow: Arc<AcquisitionWorkflow>,
    configured: Option<PathBuf>,
    mut prompter: P,
    cancellation: DownloadCancellation,
    mut output: mpsc::Sender<OrchestratorMessage>,
) {
    let (progress_sender, mut progress_events) = mpsc::unbounded::<DownloadProgress>();

    let acquisition = async move {
        let progress = move |event: DownloadProgress| {
            if let Err(error) = progress_sender.unbounded_send(event) {
                log::debug!("[ORCHESTRATOR] Progress receiver gone: {}", error);
            }
        };
        workflow
            .ensure_ready(configured, &mut prompter, &progress, &cancellation)
            .await
    };

    let mut progress_output = output.clone();
    let forwarding = async move {
        while let Some(event) = progress_events.next().await {
            if progress_output
                .send(OrchestratorMessage::AcquisitionProgress(event))
                .await
                .is_err()
            {
                break;
            }
        }
    };

    let (outcome, ()) = futures::join!(acquisition, forwarding);

    if let Err(error) = output
        .send(OrchestratorMessage::AcquisitionFinished(outcome))
        .await
    {
        log::warn!("[ORCHESTRATOR] Could not deliver acquisition outcome: {}", error);
    }
}
