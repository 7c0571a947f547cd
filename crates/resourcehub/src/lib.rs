//! Client library for the ResourceHub design-resource marketplace.
//!
//! `resourcehub` sits between a presentation layer and the ResourceHub REST backend,
//! providing:
//!
//! - A typed remote client for resources, collections, comments and notifications
//! - A local cache store for per-user liked/downloaded sets
//! - A static fallback catalog so there is always something to show
//! - An aggregation store ([`Hub`]) that keeps resources, likes, downloads, ratings,
//!   collections, comments and notifications in one immutable snapshot
//! - Advanced search with a local, conjunctive fallback filter
//!
//! # Getting Started
//!
//! ```no_run
//! use resourcehub::{search::SearchParams, session::User, Config, Hub};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let hub = Hub::builder().with_config(Config::load(None)?).build().await?;
//!
//!   // Never fails: falls back to the static catalog if the backend is down
//!   let resources = hub.get_all().await;
//!   println!("{} resources", resources.len());
//!
//!   hub.sign_in(User::new("user-1")).await;
//!   hub.toggle_like(&resources[0].id).await?;
//!
//!   let fonts = hub.advanced_search(&SearchParams::new().with_category("fonts")).await;
//!   println!("{} fonts", fonts.len());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`resource`]: Core data types (resources, collections, comments, notifications)
//! - [`client`]: The [`RemoteClient`](client::RemoteClient) seam and its HTTP implementation
//! - [`cache`]: Browser-style local storage backed by SQLite
//! - [`catalog`]: The static fallback catalog
//! - [`search`]: Search parameters, filter criteria and sorting
//! - [`thread`]: Comment threading
//! - [`state`]: The immutable state snapshot and its transitions
//! - [`hub`]: The aggregation store tying everything together
//! - [`configuration`]: Layered configuration
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, BTreeSet, HashSet},
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  sync::{Mutex, MutexGuard, PoisonError},
  time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod cache;
pub mod catalog;
pub mod client;
pub mod configuration;
pub mod error;
pub mod hub;
pub mod resource;
pub mod search;
pub mod session;
pub mod state;
pub mod thread;

pub use crate::{
  configuration::Config,
  hub::{Hub, HubBuilder},
};
use crate::{
  cache::LocalCache,
  client::RemoteClient,
  error::*,
  resource::*,
  search::SearchParams,
  session::User,
  state::HubState,
};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use resourcehub::prelude::*;
///
/// fn check(result: Result<()>) {
///   if let Err(HubError::Unauthenticated) = result {
///     println!("please sign in");
///   }
/// }
/// ```
pub mod prelude {
  pub use crate::{
    client::RemoteClient,
    error::{HubError, Result},
    resource::{Collection, Comment, License, Notification, Rating, Resource},
  };
}
