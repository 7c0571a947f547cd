use std::{collections::BTreeSet, sync::Arc};

use resourcehub::{
  cache::LocalCache,
  catalog::fallback_resources,
  client::{HttpClient, RemoteClient},
  prelude::*,
  search::{SearchParams, SortKey, SortOrder},
  session::User,
  Config, Hub,
};
use tempfile::{tempdir, TempDir};

mod backend;
mod remote;
mod workflows;

/// Nothing listens here, so every request fails fast with a connection error
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

/// Builds a hub against `api_base_url` with its cache in a fresh temporary directory.
pub async fn create_test_hub(api_base_url: &str) -> (Hub, TempDir) {
  let dir = tempdir().unwrap();
  let hub = create_hub_at(api_base_url, &dir).await;
  (hub, dir)
}

/// Builds a hub against `api_base_url` whose cache lives in `dir`.
pub async fn create_hub_at(api_base_url: &str, dir: &TempDir) -> Hub {
  let config =
    Config::default().with_api_base_url(api_base_url).with_cache_path(dir.path().join("cache.db"));
  Hub::builder().with_config(config).build().await.unwrap()
}
