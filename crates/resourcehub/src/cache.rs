//! Local cache store for per-user engagement sets.
//!
//! This emulates browser local storage on top of SQLite: a flat table of string keys
//! and JSON string values. The [`Hub`](crate::Hub) mirrors each user's liked and
//! downloaded resource ids here, under the keys `likedResources_{userId}` and
//! `downloadedResources_{userId}`, and reads them back when the backend cannot say.
//!
//! # Examples
//!
//! ```no_run
//! # use std::collections::BTreeSet;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = resourcehub::cache::LocalCache::open("cache.db").await?;
//!
//! let liked = BTreeSet::from(["res-1".to_string()]);
//! cache.store_liked("user-1", &liked).await?;
//! assert_eq!(cache.load_liked("user-1").await?, Some(liked));
//! # Ok(())
//! # }
//! ```

use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use super::*;

/// Handle to the local storage database.
///
/// Cloning is cheap; clones share the same background connection.
#[derive(Clone)]
pub struct LocalCache {
  /// Async SQLite connection handle
  conn: Connection,
}

/// Storage key of a user's liked resource ids.
pub fn liked_key(user_id: &str) -> String { format!("likedResources_{user_id}") }

/// Storage key of a user's downloaded resource ids.
pub fn downloaded_key(user_id: &str) -> String { format!("downloadedResources_{user_id}") }

impl LocalCache {
  /// Opens (or creates) the store at `path`, creating parent directories and the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    debug!("Opening local cache at {}", path.display());
    Self::initialize(Connection::open(path).await?).await
  }

  /// Opens a throwaway store that lives only as long as the handle.
  pub async fn open_in_memory() -> Result<Self> {
    Self::initialize(Connection::open_in_memory().await?).await
  }

  /// Applies the schema.
  async fn initialize(conn: Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(include_str!(concat!(
          env!("CARGO_MANIFEST_DIR"),
          "/migrations/init.sql"
        )))?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  /// Reads the raw value stored under `key`.
  pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_string();
    self
      .conn
      .call(move |conn| {
        let value = conn
          .query_row("SELECT value FROM local_storage WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
          })
          .optional()?;
        Ok(value)
      })
      .await
      .map_err(HubError::from)
  }

  /// Stores `value` under `key`, replacing any previous value.
  pub async fn set_item(&self, key: &str, value: String) -> Result<()> {
    let key = key.to_string();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
          params![key, value],
        )?;
        Ok(())
      })
      .await
      .map_err(HubError::from)
  }

  /// Deletes the value under `key`, if any.
  pub async fn remove_item(&self, key: &str) -> Result<()> {
    let key = key.to_string();
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
      })
      .await
      .map_err(HubError::from)
  }

  /// Reads an id set stored as a JSON array.
  async fn load_ids(&self, key: &str) -> Result<Option<BTreeSet<String>>> {
    match self.get_item(key).await? {
      Some(json) => Ok(Some(serde_json::from_str(&json)?)),
      None => Ok(None),
    }
  }

  /// Writes an id set as a JSON array.
  async fn store_ids(&self, key: &str, ids: &BTreeSet<String>) -> Result<()> {
    trace!("Persisting {} ids under {key}", ids.len());
    self.set_item(key, serde_json::to_string(ids)?).await
  }

  /// The user's persisted liked ids, if any were ever stored.
  pub async fn load_liked(&self, user_id: &str) -> Result<Option<BTreeSet<String>>> {
    self.load_ids(&liked_key(user_id)).await
  }

  /// Persists the user's liked ids.
  pub async fn store_liked(&self, user_id: &str, ids: &BTreeSet<String>) -> Result<()> {
    self.store_ids(&liked_key(user_id), ids).await
  }

  /// The user's persisted downloaded ids, if any were ever stored.
  pub async fn load_downloaded(&self, user_id: &str) -> Result<Option<BTreeSet<String>>> {
    self.load_ids(&downloaded_key(user_id)).await
  }

  /// Persists the user's downloaded ids.
  pub async fn store_downloaded(&self, user_id: &str, ids: &BTreeSet<String>) -> Result<()> {
    self.store_ids(&downloaded_key(user_id), ids).await
  }
}
