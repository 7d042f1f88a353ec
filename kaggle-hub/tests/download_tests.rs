//! Download and cache behavior, exercised against a mock hub.
//!
//! These tests stand in a wiremock server for the hub API and a tempdir for
//! the cache root, so they cover the full resolve / download / extract /
//! mark path without touching the network.

use std::io::Write;
use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kaggle_hub::{Configuration, DatasetHandle, HubError, KaggleHubClient};

/// Build an in-memory zip archive from (name, contents) pairs
fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn test_client(server: &MockServer, cache_root: &std::path::Path) -> KaggleHubClient {
    let config = Arc::new(Configuration {
        base_path: server.uri(),
        user_agent: Some("kaggle-hub-test/1.0".to_string()),
        client: reqwest::Client::new(),
        credentials: None,
        cache_root: cache_root.to_path_buf(),
    });
    KaggleHubClient::new(config)
}

#[tokio::test]
async fn download_extracts_archive_and_serves_cache_on_repeat() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/datasets/view/projjal1/human-conversation-training-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Human Conversation Training Data",
            "currentVersionNumber": 1,
            "totalBytes": 64
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/datasets/download/projjal1/human-conversation-training-data"))
        .and(query_param("datasetVersionNumber", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(zip_bytes(&[("chat.json", r#"[{"q":"hi","a":"hello"}]"#)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, cache.path());
    let handle: DatasetHandle = "projjal1/human-conversation-training-data".parse().unwrap();

    let path = client.dataset_download(&handle).await.unwrap();
    assert_eq!(path, client.version_dir(&handle, 1));
    assert_eq!(
        std::fs::read_to_string(path.join("chat.json")).unwrap(),
        r#"[{"q":"hi","a":"hello"}]"#
    );

    // The staging archive must be gone once extraction finished.
    assert!(!path.parent().unwrap().join("1.zip.part").exists());

    // Second download is served from the cache; both mocks expect exactly
    // one hit, verified when the server drops.
    let again = client.dataset_download(&handle).await.unwrap();
    assert_eq!(path, again);
}

#[tokio::test]
async fn pinned_version_skips_metadata_lookup() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();

    // Only the download endpoint is mounted; a metadata request would 404
    // and fail the test.
    Mock::given(method("GET"))
        .and(path("/datasets/download/owner/name"))
        .and(query_param("datasetVersionNumber", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(zip_bytes(&[("data.txt", "hello")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, cache.path());
    let handle: DatasetHandle = "owner/name/versions/3".parse().unwrap();

    let path = client.dataset_download(&handle).await.unwrap();
    assert_eq!(path, client.version_dir(&handle, 3));
    assert_eq!(std::fs::read_to_string(path.join("data.txt")).unwrap(), "hello");
}

#[tokio::test]
async fn failed_download_reports_api_error_and_leaves_no_marker() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/datasets/download/owner/name"))
        .respond_with(ResponseTemplate::new(404).set_body_string("dataset not found"))
        .mount(&server)
        .await;

    let client = test_client(&server, cache.path());
    let handle: DatasetHandle = "owner/name/versions/1".parse().unwrap();

    let err = client.dataset_download(&handle).await.unwrap_err();
    match err {
        HubError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("not found"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }

    // No version directory and no completion marker may exist after a
    // failed download.
    assert!(!client.version_dir(&handle, 1).exists());
}

#[tokio::test]
async fn corrupt_archive_reports_archive_error() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/datasets/download/owner/name"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"this is not a zip".to_vec()))
        .mount(&server)
        .await;

    let client = test_client(&server, cache.path());
    let handle: DatasetHandle = "owner/name/versions/1".parse().unwrap();

    let err = client.dataset_download(&handle).await.unwrap_err();
    assert!(matches!(err, HubError::ArchiveError { .. }), "got {:?}", err);

    // A later retry must not be satisfied from the cache.
    let version_dir = client.version_dir(&handle, 1);
    assert!(!version_dir.parent().unwrap().join("1.complete").exists());
}

#[tokio::test]
async fn metadata_failure_surfaces_for_unpinned_handles() {
    let server = MockServer::start().await;
    let cache = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/datasets/view/owner/name"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let client = test_client(&server, cache.path());
    let handle: DatasetHandle = "owner/name".parse().unwrap();

    let err = client.dataset_download(&handle).await.unwrap_err();
    assert!(matches!(err, HubError::ApiError { status: 500, .. }), "got {:?}", err);
}
