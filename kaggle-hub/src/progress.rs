use std::path::PathBuf;

use crate::handle::DatasetHandle;

#[derive(Debug, Clone)]
pub struct DownloadStarted {
    pub handle: DatasetHandle,
    pub url: String,
    pub total_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DownloadProgress {
    pub handle: DatasetHandle,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DownloadFinished {
    pub handle: DatasetHandle,
    pub output_dir: PathBuf,
}

/// Sink for download lifecycle events emitted by [`crate::KaggleHubClient`].
///
/// All hooks default to no-ops so consumers implement only the ones they
/// render. Events are emitted from the download task itself, so
/// implementations must be cheap and non-blocking.
pub trait StatusReporter: Send + Sync {
    fn on_download_started(&self, _event: &DownloadStarted) {}
    fn on_download_progress(&self, _event: &DownloadProgress) {}
    fn on_download_finished(&self, _event: &DownloadFinished) {}
}
