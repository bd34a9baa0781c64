use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::RequestId;
use crate::utils::file_name_for_url;

use super::models::{DownloadQueryRow, DownloadRecord, DownloadRequest, RecordStatus};

const COMPLETION_CHANNEL_CAPACITY: usize = 16;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// In-process download manager.
///
/// Accepts download requests, performs the transfer on a background task,
/// and publishes the request id on a broadcast channel once the transfer
/// reaches a terminal state. Completed requests stay queryable by id.
#[derive(Clone)]
pub struct DownloadManager {
    client: reqwest::Client,
    records: Arc<RwLock<HashMap<RequestId, DownloadRecord>>>,
    next_id: Arc<AtomicU64>,
    completion_tx: broadcast::Sender<RequestId>,
    download_dir: PathBuf,
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadManager {
    pub fn new() -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);
        Self::with_download_dir(download_dir)
    }

    pub fn with_download_dir(download_dir: PathBuf) -> Self {
        let (completion_tx, _) = broadcast::channel(COMPLETION_CHANNEL_CAPACITY);

        Self {
            client: reqwest::Client::new(),
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            completion_tx,
            download_dir,
        }
    }

    /// Subscribe to the completion broadcast. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<RequestId> {
        self.completion_tx.subscribe()
    }

    /// Put a download request in the queue.
    ///
    /// Returns immediately with the request id; the transfer runs on a
    /// spawned task and reports back through the completion broadcast.
    /// Must be called from within the async runtime.
    pub fn enqueue(&self, request: DownloadRequest) -> Result<RequestId> {
        if request.url.is_empty() {
            return Err(ServiceError::InvalidUrl("empty URL".to_string()));
        }
        let url =
            Url::parse(&request.url).map_err(|e| ServiceError::InvalidUrl(e.to_string()))?;

        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.write_records().insert(
            id,
            DownloadRecord {
                request: request.clone(),
                status: RecordStatus::Running,
            },
        );

        info!(request_id = id.0, url = %url, title = %request.title, "download enqueued");

        let manager = self.clone();
        let target_path = self
            .download_dir
            .join(file_name_for_url(&request.url, &request.title));
        tokio::spawn(async move {
            let outcome = manager.perform_transfer(url, &target_path).await;
            manager.finish(id, outcome);
        });

        Ok(id)
    }

    /// Synchronous status query by request id. `None` means no such request.
    pub fn query_by_id(&self, id: RequestId) -> Option<DownloadQueryRow> {
        self.read_records().get(&id).map(|record| DownloadQueryRow {
            status: record.status.as_download_status(),
            description: record.request.description.clone(),
        })
    }

    async fn perform_transfer(&self, url: Url, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes = chunk?;
            file.write_all(&chunk).await?;
        }
        file.sync_all().await?;

        Ok(())
    }

    fn finish(&self, id: RequestId, outcome: Result<()>) {
        let status = match outcome {
            Ok(()) => {
                info!(request_id = id.0, "download finished");
                RecordStatus::Success
            }
            Err(e) => {
                warn!(request_id = id.0, error = %e, "download failed");
                RecordStatus::Failure
            }
        };

        if let Some(record) = self.write_records().get_mut(&id) {
            record.status = status;
        }

        // Nobody listening is fine; the broadcast is best-effort.
        if self.completion_tx.send(id).is_err() {
            debug!(request_id = id.0, "completion broadcast had no subscribers");
        }
    }

    fn read_records(&self) -> RwLockReadGuard<'_, HashMap<RequestId, DownloadRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, HashMap<RequestId, DownloadRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    pub(crate) fn insert_completed_for_test(
        &self,
        id: RequestId,
        status: crate::domain::DownloadStatus,
        description: &str,
    ) {
        use crate::domain::DownloadStatus;

        let record_status = match status {
            DownloadStatus::Success => RecordStatus::Success,
            DownloadStatus::Failure => RecordStatus::Failure,
            DownloadStatus::Unknown => RecordStatus::Running,
        };
        self.write_records().insert(
            id,
            DownloadRecord {
                request: DownloadRequest::new("https://example.com/file", "test", description),
                status: record_status,
            },
        );
    }
}
