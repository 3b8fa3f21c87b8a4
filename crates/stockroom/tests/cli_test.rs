//! Integration tests for the `stockroom` CLI binary.
//!
//! Argument parsing, help output and completions run without a network.
//! Catalog-bound commands run against a local mock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `stockroom` binary with env isolation.
///
/// Clears all `STOCKROOM_*` env vars and points config directories at a
/// scratch directory so tests never touch the user's real configuration.
fn stockroom_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("stockroom");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("STOCKROOM_PROFILE")
        .env_remove("STOCKROOM_BASE_URL")
        .env_remove("STOCKROOM_ENDPOINT")
        .env_remove("STOCKROOM_OUTPUT")
        .env_remove("STOCKROOM_INSECURE")
        .env_remove("STOCKROOM_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn catalog() -> Value {
    json!([
        { "name": "Bluetooth", "category": "Electronic", "price": "$150", "quantity": 5 },
        { "name": "Edifier M43560", "category": "Electronic", "price": "$0", "quantity": 0 },
        { "name": "Sony 4K ultra 55 inch TV", "category": "ELECTRONICS", "price": "$1190", "quantity": 17 },
        { "name": "Samsumg 55 inch TV", "category": "ELECTRONICS", "price": "$600", "quantity": 50 },
        { "name": "samsumg S34 Ultra", "category": "phone", "price": "$8190", "quantity": 43 }
    ])
}

async fn catalog_server(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventory"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = stockroom_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("product inventory")
            .and(predicate::str::contains("products"))
            .and(predicate::str::contains("stats"))
            .and(predicate::str::contains("categories")),
    );
}

#[test]
fn test_short_help_uses_about() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("product inventory"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockroom"));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .arg("restock")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_sort_key() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .args(["products", "list", "--sort", "weight"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_profiles() {
    let home = TempDir::new().unwrap();
    stockroom_cmd(&home)
        .args(["config", "set", "endpoint", "stock"])
        .assert()
        .success();

    stockroom_cmd(&home)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));

    stockroom_cmd(&home)
        .args(["config", "show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"endpoint\": \"stock\""));
}

#[test]
fn test_config_use_unknown_profile() {
    let home = TempDir::new().unwrap();
    let output = stockroom_cmd(&home)
        .args(["config", "use", "staging"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("staging"));
}

// ── Catalog-bound commands ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_json() {
    let server = catalog_server(200, catalog()).await;
    let home = TempDir::new().unwrap();

    let output = stockroom_cmd(&home)
        .args(["--base-url", &server.uri(), "products", "list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 5);
    assert_eq!(names[0], "Bluetooth");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_low_stock_plain() {
    let server = catalog_server(200, catalog()).await;
    let home = TempDir::new().unwrap();

    stockroom_cmd(&home)
        .args(["--base-url", &server.uri(), "products", "list", "--low-stock", "-o", "plain"])
        .assert()
        .success()
        .stdout("Bluetooth\nEdifier M43560\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_plain() {
    let server = catalog_server(200, catalog()).await;
    let home = TempDir::new().unwrap();

    stockroom_cmd(&home)
        .args(["--base-url", &server.uri(), "stats", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("total_products=5")
                .and(predicate::str::contains("total_value=403150.00"))
                .and(predicate::str::contains("out_of_stock=1"))
                .and(predicate::str::contains("categories=3")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_get_by_name() {
    let server = catalog_server(200, catalog()).await;
    let home = TempDir::new().unwrap();

    stockroom_cmd(&home)
        .args(["--base-url", &server.uri(), "products", "get", "bluetooth", "-o", "plain"])
        .assert()
        .success()
        .stdout("Bluetooth\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_get_missing() {
    let server = catalog_server(200, catalog()).await;
    let home = TempDir::new().unwrap();

    let output = stockroom_cmd(&home)
        .args(["--base-url", &server.uri(), "products", "get", "Walkman"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Walkman"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_fails_load() {
    let server = catalog_server(500, json!({ "error": "boom" })).await;
    let home = TempDir::new().unwrap();

    let output = stockroom_cmd(&home)
        .args(["--base-url", &server.uri(), "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Failed to fetch products"));
}
