pub const KAGGLE_API_BASE_URL: &str = "https://www.kaggle.com/api/v1";

pub mod client;
pub mod handle;
pub mod models;
pub mod progress;

// Re-export the ergonomic client and configuration for easy access
pub use client::{BasicCredentials, Configuration, HubError, KaggleHubClient, default_cache_root};
pub use handle::DatasetHandle;
pub use models::DatasetInfo;
pub use progress::{DownloadFinished, DownloadProgress, DownloadStarted, StatusReporter};
