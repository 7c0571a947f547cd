//! Integration tests for the resourcehub CLI commands.
//!
//! Most tests point the CLI at an unreachable backend, so reads come from the
//! fallback catalog; the rest talk to a small axum backend on a random port. Tests
//! run serially since they share environment variables.

use std::path::PathBuf;

use assert_cmd::Command;
use axum::{routing::get, Json, Router};
use predicates::prelude::*;
use resourcehub::catalog::fallback_resources;
use serde_json::json;
use serial_test::serial;
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;

/// Discard-protocol port; connections are refused right away.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

// Helper function to create a command isolated in a temporary directory
fn resourcehub(dir: &TempDir) -> Command {
  let mut cmd = Command::cargo_bin("resourcehub").unwrap();
  cmd
    .env("RESOURCEHUB_API_BASE_URL", UNREACHABLE_API)
    .env("RESOURCEHUB_CACHE_PATH", dir.path().join("cache.db"))
    .env_remove("RESOURCEHUB_USER")
    .arg("--config")
    .arg(config_path(dir));
  cmd
}

fn config_path(dir: &TempDir) -> PathBuf { dir.path().join("config.toml") }

// Serves the catalog, a liked set and one collection for `u1`; returns the base URL
async fn spawn_backend() -> anyhow::Result<String> {
  let listener = TcpListener::bind("127.0.0.1:0").await?;
  let address = listener.local_addr()?;
  let app = Router::new()
    .route("/api/resources", get(|| async { Json(fallback_resources()) }))
    .route("/api/users/u1/liked-resources", get(|| async { Json(json!({ "resourceIds": ["3"] })) }))
    .route(
      "/api/users/u1/collections",
      get(|| async {
        Json(json!([{
          "id": "c1",
          "name": "Landscapes",
          "userId": "u1",
          "resourceIds": ["3", "7"],
          "dateCreated": "2024-01-01T00:00:00.000Z",
          "dateUpdated": "2024-01-02T00:00:00.000Z"
        }]))
      }),
    );
  tokio::spawn(async move { axum::serve(listener, app).await });
  Ok(format!("http://{address}/api"))
}

#[test]
#[serial]
fn test_list_serves_fallback_catalog() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("Found 8 resources"))
    .stdout(predicate::str::contains("Modern Sans Font Family"));
}

#[test]
#[serial]
fn test_list_by_category() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["list", "--category", "templates", "--sort", "a-z"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Found 2 resources"))
    .stdout(predicate::str::contains("E-commerce UI Kit"))
    .stdout(predicate::str::contains("Modern Sans Font Family").not());
}

#[test]
#[serial]
fn test_search_filters_locally() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["search", "--category", "fonts", "--license", "commercial"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Elegant Serif Display Font"))
    .stdout(predicate::str::contains("Modern Sans Font Family").not());
}

#[test]
#[serial]
fn test_search_rejects_unknown_license() {
  let dir = tempdir().unwrap();

  resourcehub(&dir).args(["search", "--license", "shareware"]).assert().failure();
}

#[test]
#[serial]
fn test_get_shows_resource() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["get", "6"])
    .assert()
    .success()
    .stdout(predicate::str::contains("E-commerce UI Kit"))
    .stdout(predicate::str::contains("45 MB"));
}

#[test]
#[serial]
fn test_get_unknown_resource() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["get", "999"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Resource 999 not found"));
}

#[test]
#[serial]
fn test_like_requires_user() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["like", "1"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("User not authenticated"));
}

#[test]
#[serial]
fn test_rate_rejects_out_of_range() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["--user", "u1", "rate", "1", "7"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("between 1 and 5"));
}

#[test]
#[serial]
fn test_collections_require_user() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["collections", "list"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("User not authenticated"));
}

#[test]
#[serial]
fn test_init_writes_config() {
  let dir = tempdir().unwrap();
  let cache = dir.path().join("elsewhere.db");

  resourcehub(&dir)
    .args(["init", "--api-base-url", "https://hub.example/api", "--accept-defaults"])
    .arg("--cache-path")
    .arg(&cache)
    .assert()
    .success()
    .stdout(predicate::str::contains("Created configuration"));

  let written = std::fs::read_to_string(config_path(&dir)).unwrap();
  assert!(written.contains("https://hub.example/api"));
  assert!(written.contains("elsewhere.db"));
}

#[test]
#[serial]
fn test_init_replaces_unreadable_config() -> anyhow::Result<()> {
  let dir = tempdir()?;
  std::fs::write(config_path(&dir), "api_base_url = [not toml")?;

  resourcehub(&dir).arg("list").assert().failure();

  resourcehub(&dir)
    .args(["init", "--api-base-url", "https://hub.example/api", "--accept-defaults"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created configuration"));

  assert!(std::fs::read_to_string(config_path(&dir))?.contains("https://hub.example/api"));
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_get_marks_collected_resources() -> anyhow::Result<()> {
  let dir = tempdir()?;
  let api = spawn_backend().await?;

  resourcehub(&dir)
    .env("RESOURCEHUB_API_BASE_URL", &api)
    .args(["--user", "u1", "get", "3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Mountain Landscape Photo Pack"))
    .stdout(predicate::str::contains("You have liked, collected this"));

  resourcehub(&dir)
    .env("RESOURCEHUB_API_BASE_URL", &api)
    .args(["--user", "u1", "get", "1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("You have").not());
  Ok(())
}

#[test]
#[serial]
fn test_init_rejects_unusable_url() {
  let dir = tempdir().unwrap();

  resourcehub(&dir)
    .args(["init", "--api-base-url", "mailto:someone", "--accept-defaults"])
    .assert()
    .failure();

  assert!(!config_path(&dir).exists());
}
