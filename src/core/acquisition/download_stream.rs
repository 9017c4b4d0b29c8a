use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::core::errors::InstallError;
use crate::core::models::{DownloadCancellation, DownloadProgress, ProgressSink};
use crate::global_constants::LOG_TAG_INSTALLER;

/// Copies a chunked body into `writer`, reporting progress after every chunk.
///
/// Every wait for the next chunk races the cancellation signal, so a cancel
/// aborts a stalled transfer and wins over a transport error that arrives
/// after it.
pub async fn stream_to_writer<S, B, E, W>(
    mut chunks: S,
    total_bytes: Option<u64>,
    writer: &mut W,
    progress: &ProgressSink,
    cancellation: &DownloadCancellation,
) -> Result<u64, InstallError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
    W: AsyncWrite + Unpin,
{
    let mut bytes_received = 0u64;
    progress(DownloadProgress::from_bytes(bytes_received, total_bytes));

    loop {
        let next_chunk = tokio::select! {
            biased;
            () = cancellation.cancelled() => {
                log::info!("{} Cancelled after {} bytes", LOG_TAG_INSTALLER, bytes_received);
                return Err(InstallError::DownloadCancelled);
            }
            next_chunk = chunks.next() => next_chunk,
        };
        let Some(chunk) = next_chunk else {
            break;
        };

        let chunk = chunk.map_err(|error| InstallError::DownloadFailed(error.to_string()))?;
        let bytes = chunk.as_ref();
        writer
            .write_all(bytes)
            .await
            .map_err(|error| InstallError::DownloadFailed(format!("write failed: {}", error)))?;

        bytes_received += bytes.len() as u64;
        progress(DownloadProgress::from_bytes(bytes_received, total_bytes));
    }

    if cancellation.is_cancelled() {
        return Err(InstallError::DownloadCancelled);
    }

    writer
        .flush()
        .await
        .map_err(|error| InstallError::DownloadFailed(format!("flush failed: {}", error)))?;

    log::info!("{} Received {} bytes", LOG_TAG_INSTALLER, bytes_received);
    Ok(bytes_received)
}
