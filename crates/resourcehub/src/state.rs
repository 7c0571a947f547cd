//! The aggregation store's state snapshot.
//!
//! [`HubState`] is a plain value. Every change goes through a method that consumes
//! the old snapshot and returns the next one, so a reader holding a clone never sees
//! a half-applied update and any transition can be tested without a backend.
//!
//! ```
//! use resourcehub::state::HubState;
//!
//! let state = HubState::default().with_like_toggled("1", 3);
//! assert!(state.liked.contains("1"));
//!
//! let state = state.with_like_toggled("1", 2);
//! assert!(!state.liked.contains("1"));
//! ```

use super::*;

/// Everything the [`Hub`](crate::Hub) knows at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HubState {
  /// The signed-in user, if any
  pub user:              Option<User>,
  /// The resource list last fetched (or the fallback catalog)
  pub resources:         Vec<Resource>,
  /// Ids the signed-in user has liked
  pub liked:             BTreeSet<String>,
  /// Ids the signed-in user has downloaded
  pub downloaded:        BTreeSet<String>,
  /// Last rating the user submitted per resource id
  pub user_ratings:      BTreeMap<String, Rating>,
  /// The user's collections
  pub collections:       Vec<Collection>,
  /// Comments loaded so far, across resources
  pub comments:          Vec<Comment>,
  /// The user's notifications
  pub notifications:     Vec<Notification>,
  /// Free-text filter of the local resource view
  pub search_query:      String,
  /// Category filter of the local resource view; empty means all
  pub selected_category: String,
}

impl HubState {
  /// Applies `f` to the resource with `id`, if it is held.
  fn patch_resource(mut self, id: &str, f: impl FnOnce(&mut Resource)) -> Self {
    if let Some(resource) = self.resources.iter_mut().find(|r| r.id == id) {
      f(resource);
    }
    self
  }

  /// Applies `f` to the comment with `id`, if it is loaded.
  fn patch_comment(mut self, id: &str, f: impl FnOnce(&mut Comment)) -> Self {
    if let Some(comment) = self.comments.iter_mut().find(|c| c.id == id) {
      f(comment);
    }
    self
  }

  /// Applies `f` to the collection with `id`, if it is loaded.
  fn patch_collection(mut self, id: &str, f: impl FnOnce(&mut Collection)) -> Self {
    if let Some(collection) = self.collections.iter_mut().find(|c| c.id == id) {
      f(collection);
    }
    self
  }

  /// Starts a session with the user's engagement sets.
  pub fn with_user(
    self,
    user: User,
    liked: BTreeSet<String>,
    downloaded: BTreeSet<String>,
  ) -> Self {
    trace!("Session started for {}", user.uid);
    Self { user: Some(user), liked, downloaded, ..self.without_user() }
  }

  /// Drops the session and everything scoped to it.
  pub fn without_user(self) -> Self {
    Self {
      user: None,
      liked: BTreeSet::new(),
      downloaded: BTreeSet::new(),
      user_ratings: BTreeMap::new(),
      collections: Vec::new(),
      notifications: Vec::new(),
      ..self
    }
  }

  /// Replaces the held resource list.
  pub fn with_resources(self, resources: Vec<Resource>) -> Self { Self { resources, ..self } }

  /// Appends a newly uploaded resource.
  pub fn with_resource_added(mut self, resource: Resource) -> Self {
    self.resources.push(resource);
    self
  }

  /// Flips `id` in the liked set and stores the server's like count.
  pub fn with_like_toggled(mut self, id: &str, likes: u64) -> Self {
    if !self.liked.remove(id) {
      self.liked.insert(id.to_string());
    }
    trace!("Liked set now holds {} ids", self.liked.len());
    self.patch_resource(id, |r| r.likes = likes)
  }

  /// Adds `id` to the downloaded set and stores the server's download count.
  pub fn with_download(mut self, id: &str, downloads: u64) -> Self {
    self.downloaded.insert(id.to_string());
    self.patch_resource(id, |r| r.downloads = downloads)
  }

  /// Records the user's rating and the server's aggregate.
  pub fn with_rating(mut self, id: &str, rating: Rating, summary: RatingSummary) -> Self {
    self.user_ratings.insert(id.to_string(), rating);
    self.with_rating_summary(id, summary)
  }

  /// Patches a resource with a fetched aggregate rating.
  ///
  /// A user rating in the summary replaces the locally remembered one.
  pub fn with_rating_summary(mut self, id: &str, summary: RatingSummary) -> Self {
    if let Some(rating) = summary.user_rating.and_then(|r| Rating::new(r).ok()) {
      self.user_ratings.insert(id.to_string(), rating);
    }
    self.patch_resource(id, |r| {
      r.average_rating = Some(summary.average_rating);
      r.total_ratings = Some(summary.total_ratings);
    })
  }

  /// Remembers a rating locally without touching the aggregate.
  pub fn with_user_rating(mut self, id: &str, rating: Rating) -> Self {
    self.user_ratings.insert(id.to_string(), rating);
    self
  }

  /// Replaces the loaded collections.
  pub fn with_collections(self, collections: Vec<Collection>) -> Self {
    Self { collections, ..self }
  }

  /// Appends a newly created collection.
  pub fn with_collection_added(mut self, collection: Collection) -> Self {
    self.collections.push(collection);
    self
  }

  /// Appends `resource_id` to a collection and stamps `date_updated`.
  pub fn with_resource_in_collection(self, collection_id: &str, resource_id: &str, now: &str) -> Self {
    self.patch_collection(collection_id, |c| {
      c.resource_ids.push(resource_id.to_string());
      c.date_updated = now.to_string();
    })
  }

  /// Removes every occurrence of `resource_id` from a collection and stamps `date_updated`.
  pub fn without_resource_in_collection(
    self,
    collection_id: &str,
    resource_id: &str,
    now: &str,
  ) -> Self {
    self.patch_collection(collection_id, |c| {
      c.resource_ids.retain(|id| id != resource_id);
      c.date_updated = now.to_string();
    })
  }

  /// Replaces the loaded comments of one resource, keeping the others.
  pub fn with_comments_for(mut self, resource_id: &str, comments: Vec<Comment>) -> Self {
    self.comments.retain(|c| c.resource_id != resource_id);
    self.comments.extend(comments);
    self
  }

  /// Appends a new comment.
  pub fn with_comment(mut self, comment: Comment) -> Self {
    self.comments.push(comment);
    self
  }

  /// Replaces a comment with its updated version.
  pub fn with_comment_replaced(self, comment: Comment) -> Self {
    let id = comment.id.clone();
    self.patch_comment(&id, |c| *c = comment)
  }

  /// Drops a comment.
  pub fn without_comment(mut self, comment_id: &str) -> Self {
    self.comments.retain(|c| c.id != comment_id);
    self
  }

  /// Stores the server's like count of a comment.
  pub fn with_comment_likes(self, comment_id: &str, likes: u64) -> Self {
    self.patch_comment(comment_id, |c| c.likes = likes)
  }

  /// Replaces the loaded notifications.
  pub fn with_notifications(self, notifications: Vec<Notification>) -> Self {
    Self { notifications, ..self }
  }

  /// Marks one notification read.
  pub fn with_notification_read(mut self, notification_id: &str) -> Self {
    if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == notification_id) {
      notification.read = true;
    }
    self
  }

  /// Marks every notification read.
  pub fn with_all_notifications_read(mut self) -> Self {
    self.notifications.iter_mut().for_each(|n| n.read = true);
    self
  }

  /// Drops a notification.
  pub fn without_notification(mut self, notification_id: &str) -> Self {
    self.notifications.retain(|n| n.id != notification_id);
    self
  }

  /// Sets the free-text filter of the local view.
  pub fn with_search_query(self, search_query: impl Into<String>) -> Self {
    Self { search_query: search_query.into(), ..self }
  }

  /// Sets the category filter of the local view.
  pub fn with_selected_category(self, selected_category: impl Into<String>) -> Self {
    Self { selected_category: selected_category.into(), ..self }
  }

  /// A held resource by id.
  pub fn get_by_id(&self, id: &str) -> Option<&Resource> {
    self.resources.iter().find(|r| r.id == id)
  }

  /// Held resources matching the search text and selected category.
  pub fn filtered_resources(&self) -> Vec<Resource> {
    let needle = self.search_query.trim().to_lowercase();
    self
      .resources
      .iter()
      .filter(|r| needle.is_empty() || r.matches_text(&needle))
      .filter(|r| self.selected_category.is_empty() || r.category == self.selected_category)
      .cloned()
      .collect()
  }

  /// Whether the user has liked `id`.
  pub fn is_liked(&self, id: &str) -> bool { self.liked.contains(id) }

  /// Whether the user has downloaded `id`.
  pub fn is_downloaded(&self, id: &str) -> bool { self.downloaded.contains(id) }

  /// The user's remembered rating of `id`.
  pub fn user_rating(&self, id: &str) -> Option<Rating> { self.user_ratings.get(id).copied() }

  /// Whether any loaded collection contains `resource_id`.
  pub fn is_resource_in_collection(&self, resource_id: &str) -> bool {
    self.collections.iter().any(|c| c.contains(resource_id))
  }

  /// The first loaded collection containing `resource_id`.
  pub fn collection_by_resource_id(&self, resource_id: &str) -> Option<&Collection> {
    self.collections.iter().find(|c| c.contains(resource_id))
  }

  /// A loaded comment by id.
  pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
    self.comments.iter().find(|c| c.id == comment_id)
  }

  /// Loaded comments of one resource, in load order.
  pub fn comments_for_resource(&self, resource_id: &str) -> Vec<Comment> {
    self.comments.iter().filter(|c| c.resource_id == resource_id).cloned().collect()
  }

  /// Number of unread notifications.
  pub fn unread_notifications_count(&self) -> usize {
    self.notifications.iter().filter(|n| !n.read).count()
  }
}
