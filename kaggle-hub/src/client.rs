use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::handle::DatasetHandle;
use crate::models::DatasetInfo;
use crate::progress::{DownloadFinished, DownloadProgress, DownloadStarted, StatusReporter};

/// Configuration for the hub client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL for the hub REST API (e.g., "https://www.kaggle.com/api/v1")
    pub base_path: String,
    /// User agent string for HTTP requests
    pub user_agent: Option<String>,
    /// HTTP client instance
    pub client: reqwest::Client,
    /// Basic-auth credentials (hub username plus API token)
    pub credentials: Option<BasicCredentials>,
    /// Root directory the dataset cache lives under
    pub cache_root: PathBuf,
}

/// Hub account credentials, attached to requests as HTTP basic auth
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    /// Hub account name
    pub username: String,
    /// API token generated from the account settings page
    pub key: String,
}

/// Platform cache directory for downloaded datasets
///
/// `$XDG_CACHE_HOME/kaggle-hub` (or the platform equivalent), falling back
/// to `.kaggle-hub-cache` under the working directory when the platform
/// reports no cache location.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("kaggle-hub"))
        .unwrap_or_else(|| PathBuf::from(".kaggle-hub-cache"))
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Configuration {
        Configuration::default()
    }

    /// Default configuration plus credentials taken from the environment
    ///
    /// Reads `KAGGLE_USERNAME` and `KAGGLE_KEY`; credentials are attached
    /// only when both are present and non-empty. Public datasets download
    /// fine without them.
    pub fn from_env() -> Configuration {
        let mut config = Configuration::default();
        if let (Ok(username), Ok(key)) = (env::var("KAGGLE_USERNAME"), env::var("KAGGLE_KEY")) {
            if !username.is_empty() && !key.is_empty() {
                config.credentials = Some(BasicCredentials { username, key });
            }
        }
        config
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_path: crate::KAGGLE_API_BASE_URL.to_owned(),
            user_agent: Some("kaggle-hub/0.1".to_owned()),
            client: reqwest::Client::new(),
            credentials: None,
            cache_root: default_cache_root(),
        }
    }
}

/// Errors that can occur when interacting with the dataset hub
///
/// The variants distinguish transport failures from hub-reported failures
/// and from local cache problems, so callers can react to each class
/// differently.
#[derive(Debug)]
pub enum HubError {
    /// Network, HTTP, or other request-level errors
    ///
    /// This includes connection failures, timeouts, DNS resolution issues,
    /// and errors while reading the response body stream.
    RequestError(Box<dyn std::error::Error + Send + Sync>),

    /// Non-success HTTP status returned by the hub
    ///
    /// Typical cases:
    /// - 404: dataset does not exist or is private
    /// - 401/403: credentials required or rejected
    /// - 429: rate limited
    ApiError {
        /// HTTP status code from the hub API
        status: u16,
        /// Response body text, when one was readable
        message: String,
    },

    /// JSON parsing or deserialization errors
    ///
    /// Occurs when the hub returns metadata that doesn't match the expected
    /// schema or is not valid JSON at all.
    ParseError(serde_json::Error),

    /// The downloaded archive could not be read or extracted
    ArchiveError {
        /// Description of what went wrong with the archive
        message: String,
    },

    /// Local filesystem error while managing the dataset cache
    IoError(std::io::Error),

    /// A dataset handle string did not parse
    InvalidHandle {
        /// Description of the rejected input
        message: String,
    },
}

impl HubError {
    /// Create a new invalid-handle error
    pub fn invalid_handle<S: Into<String>>(message: S) -> Self {
        Self::InvalidHandle {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HubError::RequestError(e) => write!(f, "Request error: {}", e),
            HubError::ApiError { status, message } => {
                write!(f, "Hub API error ({}): {}", status, message)
            }
            HubError::ParseError(e) => write!(f, "Parse error: {}", e),
            HubError::ArchiveError { message } => write!(f, "Archive error: {}", message),
            HubError::IoError(e) => write!(f, "Cache I/O error: {}", e),
            HubError::InvalidHandle { message } => {
                write!(f, "Invalid dataset handle: {}", message)
            }
        }
    }
}

impl std::error::Error for HubError {}

impl From<std::io::Error> for HubError {
    fn from(e: std::io::Error) -> Self {
        HubError::IoError(e)
    }
}

impl From<zip::result::ZipError> for HubError {
    fn from(e: zip::result::ZipError) -> Self {
        HubError::ArchiveError {
            message: e.to_string(),
        }
    }
}

/// # Kaggle Hub Client
///
/// An ergonomic Rust client for the Kaggle dataset hub, covering the two
/// operations a dataset consumer needs:
///
/// - **Metadata**: look up a dataset's title, license, and latest version
/// - **Download**: materialize a dataset version on the local filesystem,
///   served from a per-version cache on repeat calls
///
/// Downloads stream the dataset's zip archive into a staging file, extract
/// it into `<cache_root>/datasets/<owner>/<dataset>/versions/<N>/`, and
/// mark the version complete with a sibling `<N>.complete` marker file.
/// A run that dies mid-download or mid-extract leaves no marker, so the
/// next call starts over. There is no eviction; the cache only grows.
///
/// ## Usage
///
/// ```rust,no_run
/// use kaggle_hub::{Configuration, DatasetHandle, KaggleHubClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = KaggleHubClient::new(Arc::new(Configuration::from_env()));
///
///     let handle: DatasetHandle =
///         "projjal1/human-conversation-training-data".parse()?;
///     let path = client.dataset_download(&handle).await?;
///     println!("dataset files live in {}", path.display());
///
///     Ok(())
/// }
/// ```
pub struct KaggleHubClient {
    configuration: Arc<Configuration>,
    reporter: Option<Arc<dyn StatusReporter>>,
}

impl std::fmt::Debug for KaggleHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaggleHubClient")
            .field("base_path", &self.configuration.base_path)
            .field("cache_root", &self.configuration.cache_root)
            .finish()
    }
}

impl KaggleHubClient {
    /// Create a new hub client instance
    ///
    /// # Arguments
    ///
    /// * `configuration` - API configuration including base URL, user agent,
    ///   credentials, and cache root
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            reporter: None,
        }
    }

    /// Attach a sink for download lifecycle events
    ///
    /// Consumers use this to render progress bars or log download activity;
    /// without a reporter downloads are silent.
    pub fn with_reporter(mut self, reporter: Arc<dyn StatusReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    // === Metadata ===

    /// Fetch a dataset's metadata from the hub
    ///
    /// # Arguments
    ///
    /// * `handle` - Dataset to look up; a pinned version in the handle is
    ///   ignored here, the hub always describes the latest version
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use kaggle_hub::{Configuration, DatasetHandle, KaggleHubClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = KaggleHubClient::new(Arc::new(Configuration::default()));
    /// let handle: DatasetHandle = "projjal1/human-conversation-training-data".parse()?;
    /// let info = client.dataset_view(&handle).await?;
    /// println!(
    ///     "{} (latest version {})",
    ///     info.title.as_deref().unwrap_or("untitled"),
    ///     info.current_version_number.unwrap_or(0),
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dataset_view(&self, handle: &DatasetHandle) -> Result<DatasetInfo, HubError> {
        let url = format!(
            "{}/datasets/view/{}/{}",
            self.configuration.base_path,
            urlencoding::encode(&handle.owner),
            urlencoding::encode(&handle.dataset),
        );

        let response = self
            .request(&url)
            .send()
            .await
            .map_err(|e| HubError::RequestError(Box::new(e)))?;

        if response.status().is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| HubError::RequestError(Box::new(e)))?;
            serde_json::from_str(&body).map_err(HubError::ParseError)
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(HubError::ApiError { status, message })
        }
    }

    /// Resolve the version a handle refers to
    ///
    /// A pinned handle resolves to its pin without network I/O; an unpinned
    /// handle resolves to the latest version reported by the hub.
    pub async fn resolve_version(&self, handle: &DatasetHandle) -> Result<u64, HubError> {
        if let Some(version) = handle.version {
            return Ok(version);
        }

        let info = self.dataset_view(handle).await?;
        info.current_version_number.ok_or(HubError::ApiError {
            status: 500,
            message: "dataset metadata reports no current version number".to_string(),
        })
    }

    // === Cache Layout ===

    /// Directory a dataset version is materialized into
    pub fn version_dir(&self, handle: &DatasetHandle, version: u64) -> PathBuf {
        self.versions_dir(handle).join(version.to_string())
    }

    fn versions_dir(&self, handle: &DatasetHandle) -> PathBuf {
        self.configuration
            .cache_root
            .join("datasets")
            .join(&handle.owner)
            .join(&handle.dataset)
            .join("versions")
    }

    fn completion_marker(&self, handle: &DatasetHandle, version: u64) -> PathBuf {
        self.versions_dir(handle).join(format!("{}.complete", version))
    }

    /// Root directory of the local dataset cache
    pub fn cache_root(&self) -> &Path {
        &self.configuration.cache_root
    }

    // === Downloads ===

    /// Materialize a dataset version on the local filesystem
    ///
    /// Resolves the version, returns the cached directory when the version
    /// was fully downloaded before, and otherwise streams the archive from
    /// the hub and extracts it. The returned path is the directory holding
    /// the dataset's files.
    ///
    /// Progress events go to the reporter installed via
    /// [`KaggleHubClient::with_reporter`], if any.
    pub async fn dataset_download(&self, handle: &DatasetHandle) -> Result<PathBuf, HubError> {
        let version = self.resolve_version(handle).await?;
        let target = self.version_dir(handle, version);
        let marker = self.completion_marker(handle, version);

        if target.is_dir() && marker.exists() {
            return Ok(target);
        }

        let url = format!(
            "{}/datasets/download/{}/{}?datasetVersionNumber={}",
            self.configuration.base_path,
            urlencoding::encode(&handle.owner),
            urlencoding::encode(&handle.dataset),
            version,
        );

        let response = self
            .request(&url)
            .send()
            .await
            .map_err(|e| HubError::RequestError(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HubError::ApiError { status, message });
        }

        let total_bytes = response.content_length();
        self.report(|r| {
            r.on_download_started(&DownloadStarted {
                handle: handle.clone(),
                url: url.clone(),
                total_bytes,
            })
        });

        let versions_dir = self.versions_dir(handle);
        tokio::fs::create_dir_all(&versions_dir).await?;

        // Stream the archive to a staging file; the version directory only
        // appears once extraction succeeds.
        let staging = versions_dir.join(format!("{}.zip.part", version));
        let mut file = tokio::fs::File::create(&staging).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| HubError::RequestError(Box::new(e)))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            self.report(|r| {
                r.on_download_progress(&DownloadProgress {
                    handle: handle.clone(),
                    downloaded_bytes: downloaded,
                    total_bytes,
                })
            });
        }

        file.flush().await?;
        drop(file);

        // A partial tree from an earlier interrupted run carries no marker;
        // rebuild it from scratch.
        if target.exists() {
            tokio::fs::remove_dir_all(&target).await?;
        }
        extract_archive(&staging, &target)?;

        tokio::fs::write(&marker, url.as_bytes()).await?;
        let _ = tokio::fs::remove_file(&staging).await;

        self.report(|r| {
            r.on_download_finished(&DownloadFinished {
                handle: handle.clone(),
                output_dir: target.clone(),
            })
        });

        Ok(target)
    }

    // === Internals ===

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.configuration.client.get(url);
        if let Some(user_agent) = &self.configuration.user_agent {
            builder = builder.header("User-Agent", user_agent);
        }
        if let Some(credentials) = &self.configuration.credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.key));
        }
        builder
    }

    fn report<F: FnOnce(&dyn StatusReporter)>(&self, f: F) {
        if let Some(reporter) = &self.reporter {
            f(reporter.as_ref());
        }
    }
}

/// Extract every entry of the archive into `dest`
///
/// Entry names that would escape `dest` are rejected rather than written.
fn extract_archive(archive_path: &Path, dest: &Path) -> Result<(), HubError> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    std::fs::create_dir_all(dest)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(HubError::ArchiveError {
                message: format!(
                    "archive entry '{}' escapes the extraction directory",
                    entry.name()
                ),
            });
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = std::fs::File::create(&out_path)?;
        std::io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}
