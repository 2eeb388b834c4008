//! Background download manager backed by libcurl.
//!
//! Each enqueued job runs a single GET on its own thread and lands in the
//! downloads directory. Enqueue returns immediately with a [`JobHandle`];
//! completion is reported on an optional event channel when the job asked for
//! a visible completion notification. No resume and no retry.

mod destination;
mod single;

pub use destination::{
    is_safe_file_name, reserve_destination, resolve_downloads_dir, temp_path, Reservation,
};
pub use single::download_to;

use crate::config::QdlConfig;
use crate::dispatch::{Destination, DownloadManager, EnqueueError, EnqueueRequest, JobHandle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub connect_timeout: Duration,
    pub max_redirections: u32,
    /// Global switch; a job notifies only if it asked to and this is on.
    pub notify_on_completion: bool,
}

impl TransferOptions {
    pub fn from_config(config: &QdlConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            max_redirections: config.max_redirections,
            notify_on_completion: config.notify_on_completion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { path: PathBuf, bytes: u64 },
    Failed(String),
}

/// Completion notification for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub handle: JobHandle,
    pub title: String,
    pub outcome: JobOutcome,
}

pub struct CurlDownloadManager {
    downloads_dir: PathBuf,
    options: TransferOptions,
    next_id: AtomicU64,
    jobs: Mutex<Vec<(JobHandle, JoinHandle<()>)>>,
    events: Option<mpsc::Sender<JobEvent>>,
}

impl CurlDownloadManager {
    pub fn new(downloads_dir: impl Into<PathBuf>, options: TransferOptions) -> Self {
        Self {
            downloads_dir: downloads_dir.into(),
            options,
            next_id: AtomicU64::new(1),
            jobs: Mutex::new(Vec::new()),
            events: None,
        }
    }

    pub fn from_config(config: &QdlConfig) -> Self {
        Self::new(
            resolve_downloads_dir(config),
            TransferOptions::from_config(config),
        )
    }

    /// Receive completion notifications. Replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> mpsc::Receiver<JobEvent> {
        let (tx, rx) = mpsc::channel();
        self.events = Some(tx);
        rx
    }

    pub fn downloads_dir(&self) -> &std::path::Path {
        &self.downloads_dir
    }

    /// Number of jobs started and not yet joined by `wait_all`.
    pub fn pending(&self) -> usize {
        self.jobs.lock().map(|j| j.len()).unwrap_or(0)
    }

    /// Block until every job enqueued so far has finished.
    pub fn wait_all(&self) {
        let jobs = match self.jobs.lock() {
            Ok(mut jobs) => std::mem::take(&mut *jobs),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for (handle, thread) in jobs {
            if thread.join().is_err() {
                tracing::error!(job = %handle, "download thread panicked");
            }
        }
    }

    fn validate(&self, request: &EnqueueRequest) -> Result<(), EnqueueError> {
        let parsed = url::Url::parse(&request.source_uri).map_err(|e| EnqueueError::InvalidUri {
            uri: request.source_uri.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EnqueueError::InvalidUri {
                uri: request.source_uri.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if !is_safe_file_name(&request.destination_file_name) {
            return Err(EnqueueError::InvalidFileName(
                request.destination_file_name.clone(),
            ));
        }
        Ok(())
    }
}

impl DownloadManager for CurlDownloadManager {
    fn enqueue(&self, request: EnqueueRequest) -> Result<JobHandle, EnqueueError> {
        self.validate(&request)?;
        let dir = match request.destination_dir {
            Destination::PublicDownloads => self.downloads_dir.clone(),
        };
        std::fs::create_dir_all(&dir).map_err(EnqueueError::DestinationUnavailable)?;

        // Claim before spawning: same-name jobs must never share a temp file.
        let Reservation { final_path, part } =
            reserve_destination(&dir, &request.destination_file_name)
                .map_err(EnqueueError::DestinationUnavailable)?;
        let handle = JobHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        let options = self.options.clone();
        let events = self
            .events
            .clone()
            .filter(|_| request.visible_completion_notification && options.notify_on_completion);
        let EnqueueRequest {
            source_uri, title, ..
        } = request;

        tracing::info!(
            job = %handle,
            url = %source_uri,
            path = %final_path.display(),
            "starting download"
        );

        let claimed = final_path.clone();
        let thread = std::thread::Builder::new()
            .name(format!("qdl-job-{}", handle.0))
            .spawn(move || {
                let outcome = match download_to(&source_uri, part, &final_path, &options) {
                    Ok(bytes) => {
                        tracing::info!(job = %handle, bytes, "download completed");
                        JobOutcome::Completed {
                            path: final_path,
                            bytes,
                        }
                    }
                    Err(e) => {
                        tracing::warn!(job = %handle, "download failed: {:#}", e);
                        JobOutcome::Failed(format!("{e:#}"))
                    }
                };
                if let Some(tx) = events {
                    let _ = tx.send(JobEvent {
                        handle,
                        title,
                        outcome,
                    });
                }
            })
            .map_err(|e| EnqueueError::Unavailable(format!("spawn download thread: {e}")));
        let thread = match thread {
            Ok(thread) => thread,
            Err(e) => {
                let _ = std::fs::remove_file(temp_path(&claimed));
                return Err(e);
            }
        };

        match self.jobs.lock() {
            Ok(mut jobs) => jobs.push((handle, thread)),
            Err(poisoned) => poisoned.into_inner().push((handle, thread)),
        }
        Ok(handle)
    }
}
