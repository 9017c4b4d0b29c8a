use std::path::PathBuf;
use std::sync::Arc;

use crate::core::interfaces::adapters::{AcquisitionPrompter, EngineInstaller, EngineResolver};
use crate::core::models::{
    AcquisitionChoice, AcquisitionOutcome, DownloadCancellation, DownloadProgress, ProgressSink,
};
use crate::global_constants::LOG_TAG_ACQUISITION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AcquisitionStep {
    Checking,
    Prompting,
    ManualSelect,
    Downloading,
    GaveUp,
}

/// Makes sure a recognition engine is usable, asking the user to select or
/// install one until it resolves or they give up.
pub struct AcquisitionWorkflow {
    resolver: Arc<dyn EngineResolver>,
    installer: Arc<dyn EngineInstaller>,
    max_attempts: Option<usize>,
}

impl AcquisitionWorkflow {
    pub fn build(
        resolver: Arc<dyn EngineResolver>,
        installer: Arc<dyn EngineInstaller>,
        max_attempts: Option<usize>,
    ) -> Self {
        Self {
            resolver,
            installer,
            max_attempts,
        }
    }

    pub fn resolver(&self) -> &Arc<dyn EngineResolver> {
        &self.resolver
    }

    pub async fn ensure_ready(
        &self,
        configured: Option<PathBuf>,
        prompter: &mut dyn AcquisitionPrompter,
        progress: &ProgressSink,
        cancellation: &DownloadCancellation,
    ) -> AcquisitionOutcome {
        let mut candidate = configured;
        let mut prompts_shown = 0usize;
        let mut step = AcquisitionStep::Checking;

        loop {
            log::debug!("{} Step {:?}", LOG_TAG_ACQUISITION, step);
            step = match step {
                AcquisitionStep::Checking => {
                    if let Some(path) = self.resolver.resolve(candidate.as_deref()).into_path() {
                        log::info!("{} Engine ready at {:?}", LOG_TAG_ACQUISITION, path);
                        return AcquisitionOutcome::Ready(path);
                    }
                    AcquisitionStep::Prompting
                }
                AcquisitionStep::Prompting => {
                    if self.max_attempts.is_some_and(|max| prompts_shown >= max) {
                        log::warn!(
                            "{} Giving up after {} prompts",
                            LOG_TAG_ACQUISITION,
                            prompts_shown
                        );
                        prompter.report_engine_missing().await;
                        return AcquisitionOutcome::StillMissing;
                    }
                    prompts_shown += 1;

                    match prompter.choose_action().await {
                        AcquisitionChoice::SelectManually => AcquisitionStep::ManualSelect,
                        AcquisitionChoice::DownloadAndInstall => AcquisitionStep::Downloading,
                        AcquisitionChoice::Cancel => AcquisitionStep::GaveUp,
                    }
                }
                AcquisitionStep::ManualSelect => {
                    match prompter.pick_engine_path().await {
                        Some(path) => {
                            log::info!("{} User selected {:?}", LOG_TAG_ACQUISITION, path);
                            candidate = Some(path);
                        }
                        None => log::info!("{} File selection dismissed", LOG_TAG_ACQUISITION),
                    }
                    AcquisitionStep::Checking
                }
                AcquisitionStep::Downloading => {
                    cancellation.reset();
                    progress(DownloadProgress::Started);
                    let result = self.installer.download_and_install(progress, cancellation).await;
                    progress(DownloadProgress::Stopped);

                    match result {
                        Ok(()) => {
                            prompter.confirm_installer_launched().await;
                            AcquisitionStep::Checking
                        }
                        Err(error) if error.is_cancellation() => {
                            log::info!("{} {}", LOG_TAG_ACQUISITION, error);
                            AcquisitionStep::Prompting
                        }
                        Err(error) => {
                            log::error!("{} {}", LOG_TAG_ACQUISITION, error);
                            prompter.report_install_failure(&error).await;
                            AcquisitionStep::Prompting
                        }
                    }
                }
                AcquisitionStep::GaveUp => {
                    log::info!("{} User cancelled engine acquisition", LOG_TAG_ACQUISITION);
                    prompter.report_engine_missing().await;
                    return AcquisitionOutcome::UserCancelled;
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::core::errors::InstallError;
    use crate::core::models::EngineLocation;

    /// Resolves only once it has been asked `succeed_on_call` times.
    struct ScriptedResolver {
        succeed_on_call: usize,
        calls: AtomicUsize,
        candidates: Mutex<Vec<Option<PathBuf>>>,
    }

    impl ScriptedResolver {
        fn succeeding_on(call: usize) -> Self {
            Self {
                succeed_on_call: call,
                calls: AtomicUsize::new(0),
                candidates: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EngineResolver for ScriptedResolver {
        fn resolve(&self, candidate: Option<&Path>) -> EngineLocation {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.candidates.lock().unwrap().push(candidate.map(Path::to_path_buf));
            if call >= self.succeed_on_call {
                EngineLocation::resolved(PathBuf::from("/usr/bin/tesseract"))
            } else {
                EngineLocation::unresolved()
            }
        }
    }

    struct ScriptedInstaller {
        results: Mutex<VecDeque<Result<(), InstallError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedInstaller {
        fn with_results(results: Vec<Result<(), InstallError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EngineInstaller for ScriptedInstaller {
        async fn download_and_install(
            &self,
            progress: &ProgressSink,
            _cancellation: &DownloadCancellation,
        ) -> Result<(), InstallError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            progress(DownloadProgress::Percent(50));
            self.results.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }
    }

    #[derive(Default)]
    struct ScriptedPrompter {
        choices: VecDeque<AcquisitionChoice>,
        picks: VecDeque<Option<PathBuf>>,
        installer_confirmations: usize,
        reported_failures: Vec<InstallError>,
        missing_reports: usize,
    }

    impl ScriptedPrompter {
        fn choosing(choices: &[AcquisitionChoice]) -> Self {
            Self {
                choices: choices.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn picking(mut self, picks: &[Option<&str>]) -> Self {
            self.picks = picks.iter().map(|pick| pick.map(PathBuf::from)).collect();
            self
        }
    }

    #[async_trait]
    impl AcquisitionPrompter for ScriptedPrompter {
        async fn choose_action(&mut self) -> AcquisitionChoice {
            self.choices.pop_front().unwrap_or(AcquisitionChoice::Cancel)
        }

        async fn pick_engine_path(&mut self) -> Option<PathBuf> {
            self.picks.pop_front().flatten()
        }

        async fn confirm_installer_launched(&mut self) {
            self.installer_confirmations += 1;
        }

        async fn report_install_failure(&mut self, error: &InstallError) {
            self.reported_failures.push(error.clone());
        }

        async fn report_engine_missing(&mut self) {
            self.missing_reports += 1;
        }
    }

    fn no_progress() -> impl Fn(DownloadProgress) + Send + Sync {
        |_| {}
    }

    #[tokio::test]
    async fn test_ensure_ready_returns_immediately_when_configured_engine_resolves() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(1));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer, None);
        let mut prompter = ScriptedPrompter::default();

        let outcome = workflow
            .ensure_ready(
                Some(PathBuf::from("/opt/tesseract")),
                &mut prompter,
                &no_progress(),
                &DownloadCancellation::new(),
            )
            .await;

        assert_eq!(outcome, AcquisitionOutcome::Ready(PathBuf::from("/usr/bin/tesseract")));
        assert_eq!(resolver.call_count(), 1);
        assert_eq!(
            resolver.candidates.lock().unwrap()[0],
            Some(PathBuf::from("/opt/tesseract"))
        );
    }

    #[tokio::test]
    async fn test_ensure_ready_loops_until_third_resolution_succeeds() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(3));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer.clone(), None);
        let mut prompter = ScriptedPrompter::choosing(&[
            AcquisitionChoice::SelectManually,
            AcquisitionChoice::SelectManually,
        ])
        .picking(&[Some("/wrong/one"), Some("/right/one")]);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &no_progress(), &DownloadCancellation::new())
            .await;

        assert!(matches!(outcome, AcquisitionOutcome::Ready(_)));
        assert_eq!(resolver.call_count(), 3);
        assert_eq!(
            resolver.candidates.lock().unwrap().last().cloned().flatten(),
            Some(PathBuf::from("/right/one"))
        );
        assert_eq!(installer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_on_first_prompt_gives_up_without_download() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(usize::MAX));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer.clone(), None);
        let mut prompter = ScriptedPrompter::choosing(&[AcquisitionChoice::Cancel]);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &no_progress(), &DownloadCancellation::new())
            .await;

        assert_eq!(outcome, AcquisitionOutcome::UserCancelled);
        assert_eq!(installer.call_count(), 0);
        assert_eq!(resolver.call_count(), 1);
        assert_eq!(prompter.missing_reports, 1);
    }

    #[tokio::test]
    async fn test_dismissed_file_picker_rechecks_and_prompts_again() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(usize::MAX));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer, None);
        let mut prompter = ScriptedPrompter::choosing(&[
            AcquisitionChoice::SelectManually,
            AcquisitionChoice::Cancel,
        ])
        .picking(&[None]);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &no_progress(), &DownloadCancellation::new())
            .await;

        assert_eq!(outcome, AcquisitionOutcome::UserCancelled);
        assert_eq!(resolver.call_count(), 2);
    }

    #[tokio::test]
    async fn test_successful_install_rechecks_after_confirmation() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(2));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![Ok(())]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer.clone(), None);
        let mut prompter = ScriptedPrompter::choosing(&[AcquisitionChoice::DownloadAndInstall]);
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorded = events.clone();
        let progress = move |event: DownloadProgress| recorded.lock().unwrap().push(event);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &progress, &DownloadCancellation::new())
            .await;

        assert!(matches!(outcome, AcquisitionOutcome::Ready(_)));
        assert_eq!(installer.call_count(), 1);
        assert_eq!(prompter.installer_confirmations, 1);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                DownloadProgress::Started,
                DownloadProgress::Percent(50),
                DownloadProgress::Stopped
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_download_is_reported_and_prompts_again() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(usize::MAX));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![Err(
            InstallError::DownloadFailed("connection reset".to_string()),
        )]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer, None);
        let mut prompter = ScriptedPrompter::choosing(&[
            AcquisitionChoice::DownloadAndInstall,
            AcquisitionChoice::Cancel,
        ]);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &no_progress(), &DownloadCancellation::new())
            .await;

        assert_eq!(outcome, AcquisitionOutcome::UserCancelled);
        assert_eq!(
            prompter.reported_failures,
            vec![InstallError::DownloadFailed("connection reset".to_string())]
        );
        assert_eq!(prompter.installer_confirmations, 0);
        assert_eq!(resolver.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_download_is_not_reported_as_failure() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(usize::MAX));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![Err(
            InstallError::DownloadCancelled,
        )]));
        let workflow = AcquisitionWorkflow::build(resolver, installer, None);
        let mut prompter = ScriptedPrompter::choosing(&[
            AcquisitionChoice::DownloadAndInstall,
            AcquisitionChoice::Cancel,
        ]);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &no_progress(), &DownloadCancellation::new())
            .await;

        assert_eq!(outcome, AcquisitionOutcome::UserCancelled);
        assert!(prompter.reported_failures.is_empty());
    }

    #[tokio::test]
    async fn test_attempt_cap_ends_in_still_missing() {
        let resolver = Arc::new(ScriptedResolver::succeeding_on(usize::MAX));
        let installer = Arc::new(ScriptedInstaller::with_results(vec![]));
        let workflow = AcquisitionWorkflow::build(resolver.clone(), installer, Some(2));
        let mut prompter = ScriptedPrompter::choosing(&[
            AcquisitionChoice::SelectManually,
            AcquisitionChoice::SelectManually,
            AcquisitionChoice::SelectManually,
        ])
        .picking(&[Some("/a"), Some("/b"), Some("/c")]);

        let outcome = workflow
            .ensure_ready(None, &mut prompter, &no_progress(), &DownloadCancellation::new())
            .await;

        assert_eq!(outcome, AcquisitionOutcome::StillMissing);
        assert_eq!(resolver.call_count(), 3);
        assert_eq!(prompter.missing_reports, 1);
    }
}
