//! Integration tests for the `grafctl` CLI binary.
//!
//! Argument parsing, help output, completions and error handling run
//! without a server; the end-to-end cases talk to a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `grafctl` binary with env isolation.
///
/// Clears all `GRAFCTL_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn grafctl_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("grafctl");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("GRAFCTL_PROFILE")
        .env_remove("GRAFCTL_URL")
        .env_remove("GRAFCTL_API_VERSION")
        .env_remove("GRAFCTL_API_KEY")
        .env_remove("GRAFCTL_USERNAME")
        .env_remove("GRAFCTL_PASSWORD")
        .env_remove("GRAFCTL_OUTPUT")
        .env_remove("GRAFCTL_INSECURE")
        .env_remove("GRAFCTL_TIMEOUT");
    cmd
}

/// Command pre-wired to a server by flag, with bearer auth.
fn server_cmd(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = grafctl_cmd(home);
    cmd.args(["--url", &server.uri(), "--api-key", "test-key"]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Where the binary expects its config file under `home`.
fn config_file(home: &Path) -> PathBuf {
    let output = grafctl_cmd(home).args(["config", "path"]).output().unwrap();
    PathBuf::from(String::from_utf8(output.stdout).unwrap().trim())
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = grafctl_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_command_groups() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("dashboards")
            .and(predicate::str::contains("folders"))
            .and(predicate::str::contains("datasources"))
            .and(predicate::str::contains("keys")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("grafctl"));
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .args(["--output", "xml", "folders", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_under_home() {
    let home = tempfile::tempdir().unwrap();
    let path = config_file(home.path());
    assert!(path.starts_with(home.path()), "{} not under home", path.display());
    assert!(path.ends_with("config.toml"));
}

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_version = \"5.x\""));
}

#[test]
fn test_config_versions() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .args(["config", "versions", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5.x\n"));
}

#[test]
fn test_config_set_persists_to_active_profile() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .args(["config", "set", "url", "https://grafana.example.com"])
        .assert()
        .success();
    grafctl_cmd(home.path())
        .args(["config", "set", "timeout", "5"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(config_file(home.path())).unwrap();
    assert!(saved.contains("https://grafana.example.com"), "{saved}");

    grafctl_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));
}

#[test]
fn test_config_use_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = grafctl_cmd(home.path())
        .args(["config", "use", "staging"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("staging"));
}

#[test]
fn test_config_edit_refuses_malformed_file() {
    let home = tempfile::tempdir().unwrap();
    let cfg_path = config_file(home.path());
    std::fs::create_dir_all(cfg_path.parent().unwrap()).unwrap();
    let original = "[defaults]\ntimeout = \"soon\"\n\n[profiles.prod]\nurl = \"https://grafana.example.com\"\n";
    std::fs::write(&cfg_path, original).unwrap();

    grafctl_cmd(home.path())
        .args(["config", "set", "timeout", "5"])
        .assert()
        .failure();
    grafctl_cmd(home.path())
        .args(["config", "use", "prod"])
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&cfg_path).unwrap(), original);
}

#[test]
fn test_config_set_does_not_persist_env_overrides() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .env("GRAFCTL_DEFAULTS__TIMEOUT", "99")
        .args(["config", "set", "url", "https://grafana.example.com"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(config_file(home.path())).unwrap();
    assert!(saved.contains("https://grafana.example.com"), "{saved}");
    assert!(!saved.contains("99"), "{saved}");
}

// ── Connection errors ───────────────────────────────────────────────

#[test]
fn test_no_server_configured() {
    let home = tempfile::tempdir().unwrap();
    let output = grafctl_cmd(home.path())
        .args(["dashboards", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("No Grafana server configured"));
}

#[test]
fn test_missing_credentials() {
    let home = tempfile::tempdir().unwrap();
    let output = grafctl_cmd(home.path())
        .args(["--url", "http://127.0.0.1:1", "folders", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_unsupported_api_version() {
    let home = tempfile::tempdir().unwrap();
    let output = grafctl_cmd(home.path())
        .args([
            "--url",
            "http://127.0.0.1:1",
            "--api-key",
            "k",
            "--api-version",
            "9.x",
            "folders",
            "list",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("9.x"), "{text}");
    assert!(text.contains("5.x"), "{text}");
}

#[test]
fn test_unreachable_server() {
    let home = tempfile::tempdir().unwrap();
    grafctl_cmd(home.path())
        .args(["--url", "http://127.0.0.1:1", "--api-key", "k", "folders", "list"])
        .assert()
        .code(7);
}

// ── Against a mock server ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboards_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("type", "dash-db"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "uid": "abc", "title": "CPU Usage", "url": "/d/abc/cpu-usage", "tags": ["infra"] }
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    server_cmd(home.path(), &server)
        .args(["dashboards", "list", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"CPU Usage\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboards_exists_missing_exits_4() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "uid": "abc", "title": "cpu usage" }
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    server_cmd(home.path(), &server)
        .args(["dashboards", "exists", "CPU Usage"])
        .assert()
        .code(4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboards_create_from_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/dashboards/db"))
        .and(body_partial_json(json!({
            "dashboard": { "title": "CPU Usage", "timezone": "browser" },
            "folderId": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "uid": "abc", "url": "/d/abc/cpu-usage", "status": "success", "version": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("board.json");
    std::fs::write(&file, r#"{ "title": "CPU Usage", "rows": [] }"#).unwrap();

    server_cmd(home.path(), &server)
        .args(["dashboards", "create", "--folder", "3", "-o", "plain", "-F"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("abc\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboards_create_version_mismatch_exits_6() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/dashboards/db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "version-mismatch",
            "message": "The dashboard has been changed by someone else"
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("board.json");
    std::fs::write(&file, r#"{ "title": "CPU Usage" }"#).unwrap();

    let output = server_cmd(home.path(), &server)
        .args(["dashboards", "create", "-F"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("version-mismatch"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboards_delete_missing_exits_4() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/dashboards/uid/xyz"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Dashboard not found" })),
        )
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    server_cmd(home.path(), &server)
        .args(["--yes", "dashboards", "delete", "xyz"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("xyz"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_folders_ensure_creates_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/folders/id/12"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "uid": "infra", "title": "Infra"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    server_cmd(home.path(), &server)
        .args(["folders", "ensure", "12", "--uid", "infra", "--title", "Infra", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"created":true,"id":42}"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_keys_create_prints_secret_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/keys"))
        .and(body_partial_json(json!({ "name": "deploy", "role": "Editor" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "deploy", "key": "eyJrIjoiZGVwbG95In0="
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    server_cmd(home.path(), &server)
        .args(["keys", "create", "deploy", "--role", "editor", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("eyJrIjoiZGVwbG95In0=\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_with_basic_auth() {
    let server = MockServer::start().await;
    // base64("admin:secret")
    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "prometheus", "type": "prometheus" },
            { "id": 2, "name": "loki", "type": "loki" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let cfg_path = config_file(home.path());
    std::fs::create_dir_all(cfg_path.parent().unwrap()).unwrap();
    std::fs::write(
        &cfg_path,
        format!(
            "default_profile = \"lab\"\n\n[profiles.lab]\nurl = \"{}\"\nauth = \"basic\"\nusername = \"admin\"\n",
            server.uri()
        ),
    )
    .unwrap();

    grafctl_cmd(home.path())
        .env("GRAFCTL_PASSWORD", "secret")
        .args(["datasources", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n2\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_3() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alert-notifications"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    server_cmd(home.path(), &server)
        .args(["channels", "list"])
        .assert()
        .code(3);
}
