use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Progress events emitted while fetching the engine installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadProgress {
    Started,
    Percent(u8),
    Indeterminate { bytes_received: u64 },
    Stopped,
}

impl DownloadProgress {
    /// Percentage for a known total size, or indeterminate when the server
    /// did not send one.
    pub fn from_bytes(bytes_received: u64, total_bytes: Option<u64>) -> Self {
        match total_bytes {
            Some(total) if total > 0 => {
                let percent = bytes_received.saturating_mul(100) / total;
                DownloadProgress::Percent(percent.min(100) as u8)
            }
            _ => DownloadProgress::Indeterminate { bytes_received },
        }
    }
}

/// Cancellation request shared between the UI and an in-flight download.
/// A waiting download is woken through `cancelled()`.
#[derive(Debug, Clone, Default)]
pub struct DownloadCancellation {
    requested: Arc<AtomicBool>,
    signal: Arc<Notify>,
}

impl DownloadCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.signal.notify_waiters();
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.signal.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }
}

pub type ProgressSink = dyn Fn(DownloadProgress) + Send + Sync;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_with_known_total_reports_percent() {
        assert_eq!(DownloadProgress::from_bytes(250, Some(1000)), DownloadProgress::Percent(25));
        assert_eq!(DownloadProgress::from_bytes(1000, Some(1000)), DownloadProgress::Percent(100));
    }

    #[test]
    fn test_from_bytes_caps_at_one_hundred() {
        assert_eq!(DownloadProgress::from_bytes(1500, Some(1000)), DownloadProgress::Percent(100));
    }

    #[test]
    fn test_from_bytes_without_total_is_indeterminate() {
        assert_eq!(
            DownloadProgress::from_bytes(4096, None),
            DownloadProgress::Indeterminate { bytes_received: 4096 }
        );
        assert_eq!(
            DownloadProgress::from_bytes(10, Some(0)),
            DownloadProgress::Indeterminate { bytes_received: 10 }
        );
    }

    #[test]
    fn test_cancellation_is_shared_between_clones() {
        let cancellation = DownloadCancellation::new();
        let ui_handle = cancellation.clone();

        ui_handle.cancel();

        assert!(cancellation.is_cancelled());
        cancellation.reset();
        assert!(!ui_handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_wakes_a_pending_waiter() {
        let cancellation = DownloadCancellation::new();
        let ui_handle = cancellation.clone();

        let cancel_later = async move {
            tokio::task::yield_now().await;
            ui_handle.cancel();
        };
        let waited = tokio::time::timeout(std::time::Duration::from_secs(1), async {
            tokio::join!(cancellation.cancelled(), cancel_later)
        })
        .await;

        assert!(waited.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_when_already_requested() {
        let cancellation = DownloadCancellation::new();
        cancellation.cancel();

        cancellation.cancelled().await;

        assert!(cancellation.is_cancelled());
    }
}
