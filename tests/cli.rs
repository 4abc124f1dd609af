use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".payments-dashboard").join("config.json")
}

const BINARY_NAME: &str = "payments-dashboard";

/// Nothing listens on the discard port, so requests fail fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("simulate"));
}

#[test]
/// Configure should create the config file with the given values.
fn configure_creates_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--api-url")
        .arg("http://payments.internal:8000")
        .arg("--count")
        .arg("250")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Configuration saved"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("http://payments.internal:8000"));
    // Count is clamped to the API's maximum
    assert!(saved.contains("\"simulate_count\": 100"));
}

#[test]
/// Invalid API URLs are rejected before anything is saved.
fn configure_rejects_invalid_url() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--api-url")
        .arg("ftp://payments")
        .env("HOME", tmp.path())
        .assert()
        .failure();

    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// List should fail with a readable error when the API is down.
fn list_fails_when_api_unreachable() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("list")
        .arg("--api-url")
        .arg(UNREACHABLE_API)
        .env("HOME", tmp.path())
        .env_remove("PAYMENTS_API_URL")
        .assert()
        .failure()
        .stderr(contains("Failed to load transactions"));
}

#[test]
/// Clear should fail when the API is down.
fn clear_fails_when_api_unreachable() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("clear")
        .arg("--api-url")
        .arg(UNREACHABLE_API)
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("Failed to clear transactions"));
}
