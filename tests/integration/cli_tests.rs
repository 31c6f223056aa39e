//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds the binary command with a clean, isolated environment
fn api_digest(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("api-digest").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("RUST_LOG")
        .env_remove("API_URL")
        .env_remove("API_TIMEOUT")
        .env_remove("DATA_FOLDER")
        .env_remove("OUTPUT_PREFIX")
        .env_remove("LOG_LEVEL");
    cmd
}

#[test]
fn test_help() {
    let workdir = TempDir::new().unwrap();
    api_digest(&workdir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_unreachable_endpoint_fails_without_output() {
    let workdir = TempDir::new().unwrap();

    api_digest(&workdir)
        .env("API_URL", "http://127.0.0.1:1/posts")
        .env("API_TIMEOUT", "2")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Application failed"));

    assert!(!workdir.path().join("data").exists());
}

#[test]
fn test_invalid_timeout_fails() {
    let workdir = TempDir::new().unwrap();

    api_digest(&workdir)
        .env("API_TIMEOUT", "thirty")
        .assert()
        .failure()
        .stdout(predicate::str::contains("API_TIMEOUT"));
}

#[test]
fn test_settings_file_is_loaded() {
    let workdir = TempDir::new().unwrap();
    fs::write(workdir.path().join(".env"), "API_TIMEOUT=not-a-number\n").unwrap();

    api_digest(&workdir)
        .assert()
        .failure()
        .stdout(predicate::str::contains("not-a-number"));
}

#[test]
fn test_malformed_settings_line_warns_and_continues() {
    let workdir = TempDir::new().unwrap();
    fs::write(
        workdir.path().join(".env"),
        "NOT A VALID LINE\nAPI_URL=http://127.0.0.1:1/posts\nAPI_TIMEOUT=2\n",
    )
    .unwrap();

    // The run still fails on the unreachable endpoint, after the warning
    api_digest(&workdir)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Skipped malformed line"))
        .stdout(predicate::str::contains("127.0.0.1:1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_successful_run_exits_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"userId": 1, "id": 1, "title": "Test post 1"}
        ])))
        .mount(&mock_server)
        .await;

    let workdir = TempDir::new().unwrap();
    let url = mock_server.uri();

    let output_dir = workdir.path().join("out");
    let mut cmd = api_digest(&workdir);
    cmd.args(["--api-url", &url, "--data-folder", "out", "--output-prefix", "cli_"]);

    tokio::task::spawn_blocking(move || {
        cmd.assert().success();
    })
    .await
    .unwrap();

    let names: Vec<String> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("cli_raw_")));
    assert!(names.iter().any(|n| n.starts_with("cli_summary_")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_data_folder_writes_to_working_directory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"userId": 1, "id": 1, "title": "Test post 1"}
        ])))
        .mount(&mock_server)
        .await;

    let workdir = TempDir::new().unwrap();
    let mut cmd = api_digest(&workdir);
    cmd.env("API_URL", mock_server.uri()).env("DATA_FOLDER", "");

    tokio::task::spawn_blocking(move || {
        cmd.assert().success();
    })
    .await
    .unwrap();

    let names: Vec<String> = fs::read_dir(workdir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("processed_raw_")));
    assert!(names.iter().any(|n| n.starts_with("processed_summary_")));
}
