// tests/cli_tests.rs

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn ethplorer() -> Command {
    let mut cmd = Command::cargo_bin("ethplorer").unwrap();
    for var in [
        "ETHPLORER_CONFIG",
        "ETHPLORER_API_KEYS",
        "ETHPLORER_RANDOM_KEYS",
        "ETHPLORER_BASE_URL",
        "ETHPLORER_TIMEOUT_SECS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_endpoints() {
    ethplorer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("token-history"))
        .stdout(predicate::str::contains("top-holders"));
}

#[test]
fn test_missing_keys_fail() {
    let temp_dir = TempDir::new().unwrap();
    ethplorer()
        .current_dir(temp_dir.path())
        .arg("last-block")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_config_init_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("generated.yaml");

    ethplorer()
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .success();

    ethplorer()
        .args(["config", "validate"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 API key(s)"));
}

#[test]
fn test_validate_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    ethplorer()
        .args(["config", "validate"])
        .arg(temp_dir.path().join("nope.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_command_prints_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getTopTokenHolders/0xT"))
        .and(query_param("apiKey", "cli-key"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "holders": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let temp_dir = TempDir::new().unwrap();
        ethplorer()
            .current_dir(temp_dir.path())
            .env("ETHPLORER_BASE_URL", base_url)
            .args(["-k", "cli-key", "top-holders", "0xT"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"holders\""));
    })
    .await
    .unwrap();
}
