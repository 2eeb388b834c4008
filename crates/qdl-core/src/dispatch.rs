//! Download dispatch: turns a confirmed request into a job on the download manager.
//!
//! The download manager is an external capability. It is handed an
//! [`EnqueueRequest`] and returns an opaque [`JobHandle`]; transfer progress,
//! completion and failure happen behind it and are not observed here.

use crate::config::Messages;
use crate::status::{DurationClass, StatusReporter, Toaster};
use std::fmt;
use thiserror::Error;

/// A validated, confirmed download. Both fields are non-empty after trimming
/// and `file_name` contains no spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub file_name: String,
}

/// Where the download manager should place the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Public, OS-managed downloads directory.
    PublicDownloads,
}

/// Job descriptor handed to the download manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueRequest {
    pub source_uri: String,
    pub title: String,
    pub visible_completion_notification: bool,
    pub destination_dir: Destination,
    pub destination_file_name: String,
}

/// Opaque identifier of an enqueued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobHandle(pub u64);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Enqueue rejected by the download manager. Not handled by the dispatcher.
#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("invalid source uri {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("invalid destination file name {0:?}")]
    InvalidFileName(String),
    #[error("downloads directory unavailable: {0}")]
    DestinationUnavailable(#[source] std::io::Error),
    #[error("download manager unavailable: {0}")]
    Unavailable(String),
}

/// Result of a confirm: the job handle, or None when nothing was dispatched.
pub type DispatchOutcome = Result<Option<JobHandle>, EnqueueError>;

/// The external download-manager capability.
pub trait DownloadManager {
    fn enqueue(&self, request: EnqueueRequest) -> Result<JobHandle, EnqueueError>;
}

impl<M: DownloadManager + ?Sized> DownloadManager for &M {
    fn enqueue(&self, request: EnqueueRequest) -> Result<JobHandle, EnqueueError> {
        (**self).enqueue(request)
    }
}

pub struct Dispatcher<M> {
    manager: M,
    messages: Messages,
}

impl<M: DownloadManager> Dispatcher<M> {
    pub fn new(manager: M, messages: Messages) -> Self {
        Self { manager, messages }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Enqueue `request` and report a long success message naming the file.
    /// Enqueue failures are returned to the caller untouched.
    pub fn dispatch<T: Toaster>(
        &self,
        request: DownloadRequest,
        reporter: &mut StatusReporter<T>,
    ) -> Result<JobHandle, EnqueueError> {
        let enqueue = EnqueueRequest {
            source_uri: request.url,
            title: request.file_name.clone(),
            visible_completion_notification: true,
            destination_dir: Destination::PublicDownloads,
            destination_file_name: request.file_name,
        };
        let text = self.messages.started_download_for(&enqueue.title);
        let handle = self.manager.enqueue(enqueue)?;
        tracing::info!(job = %handle, "download enqueued");
        reporter.show(text, DurationClass::Long);
        Ok(handle)
    }
}
