//! Integration tests for the pipeline
//!
//! These tests use wiremock to stand in for the upstream endpoint and run
//! the full fetch → aggregate → persist cycle end-to-end.

use api_digest::config::{Config, LogLevel};
use api_digest::{run, AppError};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the given URL and folder
fn create_test_config(api_url: String, data_folder: &Path) -> Config {
    Config {
        api_url,
        api_timeout: 5,
        data_folder: data_folder.to_path_buf(),
        output_prefix: "processed_".to_string(),
        log_level: LogLevel::Debug,
    }
}

fn sample_items() -> Value {
    json!([
        {"userId": 1, "id": 1, "title": "Test post 1", "body": "Body 1"},
        {"userId": 1, "id": 2, "title": "Test post 2", "body": "Body 2"},
        {"userId": 2, "id": 3, "title": "Another post", "body": "Body 3"},
        {"id": 4, "title": "Ünïcödé", "body": "orphan"}
    ])
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read output")).expect("parse output")
}

#[tokio::test]
async fn test_full_run_writes_raw_and_summary() {
    let mock_server = MockServer::start().await;
    let items = sample_items();

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let data_folder = dir.path().join("data");
    let config = create_test_config(format!("{}/posts", mock_server.uri()), &data_folder);

    let saved = run(&config).await.expect("pipeline should succeed");

    assert!(data_folder.is_dir());
    assert_eq!(fs::read_dir(&data_folder).unwrap().count(), 2);

    assert_eq!(read_json(&saved.raw_path), items);

    let summary = read_json(&saved.summary_path);
    assert!(summary.get("items").is_none());
    assert_eq!(summary["total_items"], 4);
    assert_eq!(summary["summary"]["unique_users"], 3);
    assert_eq!(
        summary["summary"]["items_by_user"],
        json!({"1": 2, "2": 1, "unknown": 1})
    );

    // (11 + 11 + 12 + 7) / 4
    let average = summary["summary"]["average_title_length"].as_f64().unwrap();
    assert!((average - 10.25).abs() < 1e-9);
}

#[tokio::test]
async fn test_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(mock_server.uri(), dir.path());

    let saved = run(&config).await.unwrap();

    assert_eq!(read_json(&saved.raw_path), json!([]));
    let summary = read_json(&saved.summary_path);
    assert_eq!(summary["total_items"], 0);
    assert_eq!(summary["summary"]["unique_users"], 0);
    assert_eq!(summary["summary"]["average_title_length"].as_f64(), Some(0.0));
    assert_eq!(summary["summary"]["items_by_user"], json!({}));
}

#[tokio::test]
async fn test_http_error_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let data_folder = dir.path().join("data");
    let config = create_test_config(mock_server.uri(), &data_folder);

    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, AppError::Fetch(ref e) if e.is_network()));
    assert!(!data_folder.exists());
}

#[tokio::test]
async fn test_invalid_json_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ truncated"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let data_folder = dir.path().join("data");
    let config = create_test_config(mock_server.uri(), &data_folder);

    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, AppError::Fetch(ref e) if e.is_parse()));
    assert!(!data_folder.exists());
}

#[tokio::test]
async fn test_non_array_payload_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let data_folder = dir.path().join("data");
    let config = create_test_config(mock_server.uri(), &data_folder);

    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, AppError::Aggregate(_)));
    assert!(!data_folder.exists());
}

#[tokio::test]
async fn test_unwritable_folder_is_output_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_items()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let data_folder = dir.path().join("no_parent").join("data");
    let config = create_test_config(mock_server.uri(), &data_folder);

    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, AppError::Output(_)));
}
