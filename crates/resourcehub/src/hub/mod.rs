//! The aggregation store.
//!
//! A [`Hub`] is built once at start-up and shared by reference. It owns the remote
//! client and the local cache, and keeps everything the presentation layer reads in a
//! single [`HubState`] snapshot.
//!
//! Mutations follow one pattern: check the session, call the backend, and only after
//! the backend confirms, commit a pure state transition. A failed call leaves the
//! snapshot untouched and hands the error back. Liked and downloaded sets are written
//! to the local cache before they are committed in memory.
//!
//! Reads never fail: the resource list falls back to the static catalog and advanced
//! search falls back to filtering that catalog locally.
//!
//! # Examples
//!
//! ```no_run
//! use resourcehub::{session::User, Config, Hub};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hub = Hub::builder().with_config(Config::load(None)?).build().await?;
//! hub.sign_in(User::new("user-1").with_display_name("Ada")).await;
//!
//! hub.toggle_like("res-1").await?;
//! hub.add_download("res-1").await?;
//! assert!(hub.snapshot().liked.contains("res-1"));
//!
//! let collection = hub.create_collection("Moodboard", None).await?;
//! hub.add_to_collection(&collection.id, "res-1").await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::{
  catalog::fallback_resources,
  client::HttpClient,
  resource::timestamp_now,
  thread::{build_threads, CommentThread},
};


/// Builder for a [`Hub`].
///
/// Anything not supplied is derived from the configuration: an [`HttpClient`] for
/// `api_base_url` and a [`LocalCache`] at `cache_path`.
#[derive(Default)]
pub struct HubBuilder {
  /// Configuration, defaults when unset
  config: Option<Config>,
  /// Remote client override
  client: Option<Arc<dyn RemoteClient>>,
  /// Local cache override
  cache:  Option<LocalCache>,
}

impl HubBuilder {
  /// Uses `config` for everything not overridden.
  pub fn with_config(mut self, config: Config) -> Self {
    self.config = Some(config);
    self
  }

  /// Talks to the backend through `client` instead of HTTP.
  pub fn with_client(mut self, client: Arc<dyn RemoteClient>) -> Self {
    self.client = Some(client);
    self
  }

  /// Uses an already opened cache.
  pub fn with_cache(mut self, cache: LocalCache) -> Self {
    self.cache = Some(cache);
    self
  }

  /// Opens whatever was not supplied and assembles the hub.
  pub async fn build(self) -> Result<Hub> {
    let config = self.config.unwrap_or_default();
    let client: Arc<dyn RemoteClient> = match self.client {
      Some(client) => client,
      None => Arc::new(HttpClient::new(&config.api_base_url)?),
    };
    let cache = match self.cache {
      Some(cache) => cache,
      None => LocalCache::open(&config.cache_path).await?,
    };

    Ok(Hub {
      client,
      cache,
      stale_after: config.stale_after(),
      state: Mutex::new(HubState::default()),
      fetched_at: Mutex::new(None),
      persist_lock: tokio::sync::Mutex::new(()),
      in_flight: Mutex::new(HashSet::new()),
    })
  }
}

/// One of the two per-user id sets mirrored to local storage.
#[derive(Debug, Clone, Copy)]
enum Engagement {
  /// Liked resources
  Liked,
  /// Downloaded resources
  Downloaded,
}

/// Marks a (mutation, id) pair as running until dropped.
struct InFlight<'a> {
  /// Set the key was inserted into
  running: &'a Mutex<HashSet<String>>,
  /// `mutation:id`
  key:     String,
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.running.lock().unwrap_or_else(PoisonError::into_inner).remove(&self.key);
  }
}

/// The aggregation store. See the [module documentation](self).
pub struct Hub {
  /// Backend access
  client:       Arc<dyn RemoteClient>,
  /// Local storage for engagement sets
  cache:        LocalCache,
  /// How long a fetched resource list is served as is
  stale_after:  Duration,
  /// Current snapshot; never held across an await
  state:        Mutex<HubState>,
  /// When the held resource list was fetched; `None` marks it stale
  fetched_at:   Mutex<Option<Instant>>,
  /// Serializes the persist-then-commit step of engagement sets
  persist_lock: tokio::sync::Mutex<()>,
  /// Keys of per-id mutations currently running
  in_flight:    Mutex<HashSet<String>>,
}

impl Hub {
  /// Starts building a hub.
  pub fn builder() -> HubBuilder { HubBuilder::default() }

  /// Locks the snapshot, recovering from a poisoned lock.
  fn state(&self) -> MutexGuard<'_, HubState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Replaces the snapshot with `transition(snapshot)`.
  fn commit(&self, transition: impl FnOnce(HubState) -> HubState) {
    let mut state = self.state();
    let current = std::mem::take(&mut *state);
    *state = transition(current);
  }

  /// Locks the fetch timestamp, recovering from a poisoned lock.
  fn fetched_at(&self) -> MutexGuard<'_, Option<Instant>> {
    self.fetched_at.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// The signed-in user, or [`HubError::Unauthenticated`].
  fn require_user(&self) -> Result<User> { self.current_user().ok_or(HubError::Unauthenticated) }

  /// Claims `(mutation, id)` for the lifetime of the returned guard.
  fn begin(&self, mutation: &'static str, id: &str) -> Result<InFlight<'_>> {
    let key = format!("{mutation}:{id}");
    let mut running = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
    if !running.insert(key.clone()) {
      debug!("Rejecting concurrent {mutation} of {id}");
      return Err(HubError::MutationInFlight { mutation, id: id.to_string() });
    }
    Ok(InFlight { running: &self.in_flight, key })
  }

  /// A copy of the current state.
  pub fn snapshot(&self) -> HubState { self.state().clone() }

  // Session

  /// The signed-in user, if any.
  pub fn current_user(&self) -> Option<User> { self.state().user.clone() }

  /// Starts a session for `user`.
  ///
  /// Liked and downloaded ids come from the backend and are mirrored to local
  /// storage; when the backend cannot answer, the locally stored sets are used.
  pub async fn sign_in(&self, user: User) {
    let _persist = self.persist_lock.lock().await;
    let (liked, downloaded) = futures::join!(
      self.rehydrate(Engagement::Liked, &user.uid),
      self.rehydrate(Engagement::Downloaded, &user.uid)
    );
    debug!("Signed in {} with {} liked, {} downloaded", user.uid, liked.len(), downloaded.len());
    self.commit(|state| state.with_user(user, liked, downloaded));
  }

  /// Ends the session and forgets everything scoped to it.
  pub async fn sign_out(&self) {
    let _persist = self.persist_lock.lock().await;
    self.commit(HubState::without_user);
  }

  /// Loads one engagement set, preferring the backend over local storage.
  async fn rehydrate(&self, kind: Engagement, user_id: &str) -> BTreeSet<String> {
    let remote = match kind {
      Engagement::Liked => self.client.liked_resources(user_id).await,
      Engagement::Downloaded => self.client.downloaded_resources(user_id).await,
    };

    match remote {
      Ok(ids) => {
        let ids: BTreeSet<String> = ids.into_iter().collect();
        if let Err(e) = self.persist(kind, user_id, &ids).await {
          warn!("Could not mirror {kind:?} ids of {user_id} locally: {e}");
        }
        ids
      },
      Err(e) => {
        warn!("Using locally stored {kind:?} ids of {user_id}: {e}");
        let local = match kind {
          Engagement::Liked => self.cache.load_liked(user_id).await,
          Engagement::Downloaded => self.cache.load_downloaded(user_id).await,
        };
        local
          .unwrap_or_else(|e| {
            warn!("Ignoring unreadable local {kind:?} ids of {user_id}: {e}");
            None
          })
          .unwrap_or_default()
      },
    }
  }

  /// Writes one engagement set to local storage.
  async fn persist(&self, kind: Engagement, user_id: &str, ids: &BTreeSet<String>) -> Result<()> {
    match kind {
      Engagement::Liked => self.cache.store_liked(user_id, ids).await,
      Engagement::Downloaded => self.cache.store_downloaded(user_id, ids).await,
    }
  }

  /// Persists the engagement set produced by `transition`, then commits it.
  ///
  /// Skipped when the session changed while the backend call was running.
  async fn commit_engagement(
    &self,
    kind: Engagement,
    user: &User,
    transition: impl Fn(HubState) -> HubState,
  ) -> Result<()> {
    let _persist = self.persist_lock.lock().await;
    let next = transition(self.snapshot());
    if next.user.as_ref().map(|u| u.uid.as_str()) != Some(user.uid.as_str()) {
      debug!("Session changed during {kind:?} update of {}; not committing", user.uid);
      return Ok(());
    }
    let ids = match kind {
      Engagement::Liked => &next.liked,
      Engagement::Downloaded => &next.downloaded,
    };
    self.persist(kind, &user.uid, ids).await?;
    self.commit(transition);
    Ok(())
  }

  // Resources

  /// Every resource, never failing.
  ///
  /// Within the staleness window the held list is returned without a request.
  /// Otherwise the backend is asked; if it cannot answer, the static catalog is
  /// served in its place.
  pub async fn get_all(&self) -> Vec<Resource> {
    let fresh = self.fetched_at().is_some_and(|at| at.elapsed() < self.stale_after);
    if fresh {
      trace!("Serving held resource list");
      return self.state().resources.clone();
    }
    self.refresh_resources().await
  }

  /// Refetches the resource list regardless of its age.
  pub async fn refresh_resources(&self) -> Vec<Resource> {
    let resources = match self.client.all_resources().await {
      Ok(resources) => resources,
      Err(e) => {
        warn!("Serving fallback catalog, resource fetch failed: {e}");
        fallback_resources()
      },
    };
    self.commit(|state| state.with_resources(resources.clone()));
    *self.fetched_at() = Some(Instant::now());
    resources
  }

  /// Marks the held resource list stale so the next read refetches it.
  pub fn invalidate_resources(&self) { *self.fetched_at() = None; }

  /// A held resource by id.
  pub fn get_by_id(&self, id: &str) -> Option<Resource> { self.state().get_by_id(id).cloned() }

  /// Held resources matching the current search text and category.
  pub fn filtered_resources(&self) -> Vec<Resource> { self.state().filtered_resources() }

  /// Sets the free-text filter of [`Hub::filtered_resources`].
  pub fn set_search_query(&self, query: impl Into<String>) {
    let query = query.into();
    self.commit(|state| state.with_search_query(query));
  }

  /// Sets the category filter of [`Hub::filtered_resources`]; empty means all.
  pub fn set_selected_category(&self, category: impl Into<String>) {
    let category = category.into();
    self.commit(|state| state.with_selected_category(category));
  }

  /// Backend free-text search.
  pub async fn search_resources(&self, query: &str) -> Result<Vec<Resource>> {
    self.client.search_resources(query).await
  }

  /// Backend category listing.
  pub async fn resources_by_category(&self, category: &str) -> Result<Vec<Resource>> {
    self.client.resources_by_category(category).await
  }

  /// Advanced search, never failing.
  ///
  /// The backend's answer is returned as is. When the backend cannot answer, the
  /// static catalog is filtered locally instead; sorting is left to the caller.
  pub async fn advanced_search(&self, params: &SearchParams) -> Vec<Resource> {
    match self.client.advanced_search(params).await {
      Ok(resources) => resources,
      Err(e) => {
        warn!("Filtering fallback catalog locally, search failed: {e}");
        params.filter(&fallback_resources())
      },
    }
  }

  /// Uploads a new resource on behalf of the signed-in user (or `Anonymous`).
  ///
  /// The resource gets a generated `res-<millis>-<suffix>` id, zeroed counters and
  /// today's date, and is appended to the held list.
  pub fn add_resource(&self, draft: NewResource) -> Resource {
    let now = Utc::now();
    let suffix = Uuid::new_v4().simple().to_string();
    let id = format!("res-{}-{}", now.timestamp_millis(), &suffix[..9]);
    let author = self.current_user().map_or_else(|| "Anonymous".to_string(), |u| u.author_name());
    let resource = draft.into_resource(id, author, now.format("%Y-%m-%d").to_string());

    debug!("Added resource {} ({})", resource.id, resource.title);
    let added = resource.clone();
    self.commit(|state| state.with_resource_added(added));
    resource
  }

  // Engagement

  /// Likes `id`, or unlikes it if already liked.
  ///
  /// The resource list is refetched afterwards to pick up server-side counters.
  pub async fn toggle_like(&self, id: &str) -> Result<()> {
    let user = self.require_user()?;
    let _running = self.begin("like", id)?;

    let LikeCount { likes } = self.client.toggle_like(id, &user.uid).await?;
    self
      .commit_engagement(Engagement::Liked, &user, |state| state.with_like_toggled(id, likes))
      .await?;

    self.invalidate_resources();
    self.refresh_resources().await;
    Ok(())
  }

  /// Records a download of `id`.
  ///
  /// The backend is told about every download; the downloaded set only ever grows.
  pub async fn add_download(&self, id: &str) -> Result<()> {
    let user = self.require_user()?;
    let _running = self.begin("download", id)?;

    let DownloadCount { downloads } = self.client.record_download(id, &user.uid).await?;
    self
      .commit_engagement(Engagement::Downloaded, &user, |state| state.with_download(id, downloads))
      .await?;

    self.invalidate_resources();
    self.refresh_resources().await;
    Ok(())
  }

  /// Whether the signed-in user has liked `id`.
  pub fn is_liked(&self, id: &str) -> bool { self.state().is_liked(id) }

  /// Whether the signed-in user has downloaded `id`.
  pub fn is_downloaded(&self, id: &str) -> bool { self.state().is_downloaded(id) }

  // Ratings

  /// Rates `id` and patches its aggregate from the backend's answer.
  pub async fn rate_resource(&self, id: &str, rating: Rating) -> Result<RatingSummary> {
    let user = self.require_user()?;
    let _running = self.begin("rate", id)?;

    let summary = self.client.rate_resource(id, &user.uid, rating).await?;
    self.commit(|state| state.with_rating(id, rating, summary));
    Ok(summary)
  }

  /// Fetches the aggregate rating of `id` and patches the held resource.
  pub async fn load_ratings(&self, id: &str) -> Result<RatingSummary> {
    let summary = self.client.resource_ratings(id).await?;
    self.commit(|state| state.with_rating_summary(id, summary));
    Ok(summary)
  }

  /// The rating the user last gave `id`, as remembered locally.
  pub fn user_rating(&self, id: &str) -> Option<Rating> { self.state().user_rating(id) }

  /// Remembers a rating locally without telling the backend.
  pub fn set_user_rating(&self, id: &str, rating: Rating) {
    self.commit(|state| state.with_user_rating(id, rating));
  }

  // Collections

  /// Fetches the user's collections.
  pub async fn load_collections(&self) -> Result<Vec<Collection>> {
    let user = self.require_user()?;
    let collections = self.client.user_collections(&user.uid).await?;
    let loaded = collections.clone();
    self.commit(|state| state.with_collections(loaded));
    Ok(collections)
  }

  /// Creates a collection.
  pub async fn create_collection(
    &self,
    name: &str,
    description: Option<&str>,
  ) -> Result<Collection> {
    let user = self.require_user()?;
    let draft =
      NewCollection { name: name.to_string(), description: description.map(str::to_string) };
    let collection = self.client.create_collection(&user.uid, &draft).await?;
    let created = collection.clone();
    self.commit(|state| state.with_collection_added(created));
    Ok(collection)
  }

  /// Appends `resource_id` to a collection.
  pub async fn add_to_collection(&self, collection_id: &str, resource_id: &str) -> Result<()> {
    let user = self.require_user()?;
    self.client.add_to_collection(&user.uid, collection_id, resource_id).await?;
    let now = timestamp_now();
    self.commit(|state| state.with_resource_in_collection(collection_id, resource_id, &now));
    Ok(())
  }

  /// Removes `resource_id` from a collection.
  pub async fn remove_from_collection(&self, collection_id: &str, resource_id: &str) -> Result<()> {
    let user = self.require_user()?;
    self.client.remove_from_collection(&user.uid, collection_id, resource_id).await?;
    let now = timestamp_now();
    self.commit(|state| state.without_resource_in_collection(collection_id, resource_id, &now));
    Ok(())
  }

  /// Resources of one of the user's collections, from the backend.
  pub async fn collection_resources(&self, collection_id: &str) -> Result<Vec<Resource>> {
    let user = self.require_user()?;
    self.client.collection_resources(&user.uid, collection_id).await
  }

  /// Whether any loaded collection contains `resource_id`.
  pub fn is_resource_in_collection(&self, resource_id: &str) -> bool {
    self.state().is_resource_in_collection(resource_id)
  }

  /// The first loaded collection containing `resource_id`.
  pub fn collection_by_resource_id(&self, resource_id: &str) -> Option<Collection> {
    self.state().collection_by_resource_id(resource_id).cloned()
  }

  // Comments

  /// Fetches the comments of a resource, replacing those loaded before.
  pub async fn load_comments(&self, resource_id: &str) -> Result<Vec<Comment>> {
    let comments = self.client.resource_comments(resource_id).await?;
    let loaded = comments.clone();
    self.commit(|state| state.with_comments_for(resource_id, loaded));
    Ok(comments)
  }

  /// Posts a comment, or a reply to `parent_id`.
  ///
  /// A reply must name a loaded top-level comment on the same resource; anything
  /// else is rejected with [`HubError::InvalidReply`] before the backend is called.
  pub async fn add_comment(
    &self,
    resource_id: &str,
    content: &str,
    parent_id: Option<&str>,
  ) -> Result<Comment> {
    let user = self.require_user()?;
    if let Some(parent_id) = parent_id {
      let valid = self
        .state()
        .comment(parent_id)
        .is_some_and(|parent| parent.is_top_level() && parent.resource_id == resource_id);
      if !valid {
        return Err(HubError::InvalidReply { parent_id: parent_id.to_string() });
      }
    }

    let comment = self.client.add_comment(resource_id, &user.uid, content, parent_id).await?;
    let added = comment.clone();
    self.commit(|state| state.with_comment(added));
    Ok(comment)
  }

  /// Replaces the content of a comment.
  pub async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment> {
    self.require_user()?;
    let comment = self.client.update_comment(comment_id, content).await?;
    let updated = comment.clone();
    self.commit(|state| state.with_comment_replaced(updated));
    Ok(comment)
  }

  /// Deletes a comment.
  pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
    let user = self.require_user()?;
    self.client.delete_comment(comment_id, &user.uid).await?;
    self.commit(|state| state.without_comment(comment_id));
    Ok(())
  }

  /// Likes a comment and returns its new like count.
  pub async fn like_comment(&self, comment_id: &str) -> Result<u64> {
    let user = self.require_user()?;
    let _running = self.begin("comment-like", comment_id)?;

    let LikeCount { likes } = self.client.like_comment(comment_id, &user.uid).await?;
    self.commit(|state| state.with_comment_likes(comment_id, likes));
    Ok(likes)
  }

  /// Loaded comments of a resource.
  pub fn comments_for_resource(&self, resource_id: &str) -> Vec<Comment> {
    self.state().comments_for_resource(resource_id)
  }

  /// Loaded comments of a resource, grouped into threads.
  pub fn comment_threads(&self, resource_id: &str) -> Vec<CommentThread> {
    build_threads(&self.comments_for_resource(resource_id))
  }

  // Notifications

  /// Fetches the user's notifications.
  pub async fn load_notifications(&self) -> Result<Vec<Notification>> {
    let user = self.require_user()?;
    let notifications = self.client.user_notifications(&user.uid).await?;
    let loaded = notifications.clone();
    self.commit(|state| state.with_notifications(loaded));
    Ok(notifications)
  }

  /// Marks one notification read.
  pub async fn mark_notification_as_read(&self, notification_id: &str) -> Result<()> {
    let user = self.require_user()?;
    self.client.mark_notification_read(notification_id, &user.uid).await?;
    self.commit(|state| state.with_notification_read(notification_id));
    Ok(())
  }

  /// Marks every notification read.
  pub async fn mark_all_notifications_as_read(&self) -> Result<()> {
    let user = self.require_user()?;
    self.client.mark_all_notifications_read(&user.uid).await?;
    self.commit(HubState::with_all_notifications_read);
    Ok(())
  }

  /// Deletes a notification.
  pub async fn delete_notification(&self, notification_id: &str) -> Result<()> {
    let user = self.require_user()?;
    self.client.delete_notification(notification_id, &user.uid).await?;
    self.commit(|state| state.without_notification(notification_id));
    Ok(())
  }

  /// Number of unread notifications in the current snapshot.
  pub fn unread_notifications_count(&self) -> usize { self.state().unread_notifications_count() }
}
