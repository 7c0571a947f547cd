//! In-memory [`RemoteClient`] for unit tests.

use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};

use tokio::sync::Notify;

use super::*;

/// Scripted backend that records how often it is called.
///
/// Responses come from the fields below; flipping `failing` turns every call into an
/// HTTP 500, and `gate` parks mutations until notified.
#[derive(Default)]
pub struct MockClient {
  /// Number of calls made, whatever the endpoint
  pub calls:         AtomicUsize,
  /// Answer every call with an error
  pub failing:       AtomicBool,
  /// Held by mutations until notified
  pub gate:          Option<Arc<Notify>>,
  /// Served by the resource endpoints
  pub resources:     Mutex<Vec<Resource>>,
  /// Served by the liked endpoint
  pub liked:         Vec<String>,
  /// Served by the downloaded endpoint
  pub downloaded:    Vec<String>,
  /// Served by the collections endpoint
  pub collections:   Vec<Collection>,
  /// Served by the comments endpoint
  pub comments:      Vec<Comment>,
  /// Served by the notifications endpoint
  pub notifications: Vec<Notification>,
  /// Served by the rating endpoints
  pub rating:        Option<RatingSummary>,
}

impl MockClient {
  /// A client serving `resources`.
  pub fn with_resources(resources: Vec<Resource>) -> Self {
    Self { resources: Mutex::new(resources), ..Self::default() }
  }

  /// A client that fails every call.
  pub fn failing() -> Self {
    let client = Self::default();
    client.failing.store(true, Ordering::SeqCst);
    client
  }

  /// Calls made so far.
  pub fn call_count(&self) -> usize { self.calls.load(Ordering::SeqCst) }

  /// Counts the call and fails when asked to.
  fn record(&self, endpoint: &str) -> Result<()> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.failing.load(Ordering::SeqCst) {
      return Err(HubError::Http { status: 500, url: format!("mock://{endpoint}") });
    }
    Ok(())
  }

  /// Counts the call, then waits on the gate if one is set.
  async fn record_gated(&self, endpoint: &str) -> Result<()> {
    self.record(endpoint)?;
    if let Some(gate) = &self.gate {
      gate.notified().await;
    }
    Ok(())
  }

  /// Bumps the likes of a served resource.
  fn bump_likes(&self, id: &str) -> u64 {
    let mut resources = self.resources.lock().unwrap();
    match resources.iter_mut().find(|r| r.id == id) {
      Some(resource) => {
        resource.likes += 1;
        resource.likes
      },
      None => 1,
    }
  }
}

#[async_trait]
impl RemoteClient for MockClient {
  async fn all_resources(&self) -> Result<Vec<Resource>> {
    self.record("resources")?;
    Ok(self.resources.lock().unwrap().clone())
  }

  async fn resource(&self, id: &str) -> Result<Resource> {
    self.record("resource")?;
    let resources = self.resources.lock().unwrap();
    resources
      .iter()
      .find(|r| r.id == id)
      .cloned()
      .ok_or_else(|| HubError::Http { status: 404, url: format!("mock://resources/{id}") })
  }

  async fn search_resources(&self, query: &str) -> Result<Vec<Resource>> {
    self.record("search")?;
    let needle = query.to_lowercase();
    Ok(self.resources.lock().unwrap().iter().filter(|r| r.matches_text(&needle)).cloned().collect())
  }

  async fn advanced_search(&self, params: &SearchParams) -> Result<Vec<Resource>> {
    self.record("search")?;
    Ok(params.filter(&self.resources.lock().unwrap()))
  }

  async fn resources_by_category(&self, category: &str) -> Result<Vec<Resource>> {
    self.record("category")?;
    Ok(self.resources.lock().unwrap().iter().filter(|r| r.category == category).cloned().collect())
  }

  async fn toggle_like(&self, id: &str, _user_id: &str) -> Result<LikeCount> {
    self.record_gated("like").await?;
    Ok(LikeCount { likes: self.bump_likes(id) })
  }

  async fn record_download(&self, _id: &str, _user_id: &str) -> Result<DownloadCount> {
    self.record_gated("download").await?;
    Ok(DownloadCount { downloads: self.call_count() as u64 })
  }

  async fn rate_resource(&self, _id: &str, _user_id: &str, rating: Rating) -> Result<RatingSummary> {
    self.record_gated("rate").await?;
    Ok(self.rating.unwrap_or(RatingSummary {
      average_rating: f64::from(rating.value()),
      total_ratings:  1,
      user_rating:    Some(rating.value()),
    }))
  }

  async fn resource_ratings(&self, _id: &str) -> Result<RatingSummary> {
    self.record("ratings")?;
    self.rating.ok_or_else(|| HubError::Http { status: 404, url: "mock://ratings".into() })
  }

  async fn create_collection(&self, user_id: &str, draft: &NewCollection) -> Result<Collection> {
    self.record("collections")?;
    Ok(Collection {
      id:           format!("col-{}", self.call_count()),
      name:         draft.name.clone(),
      description:  draft.description.clone(),
      user_id:      user_id.to_string(),
      resource_ids: Vec::new(),
      date_created: "2024-01-01T00:00:00.000Z".into(),
      date_updated: "2024-01-01T00:00:00.000Z".into(),
    })
  }

  async fn user_collections(&self, _user_id: &str) -> Result<Vec<Collection>> {
    self.record("collections")?;
    Ok(self.collections.clone())
  }

  async fn add_to_collection(&self, _: &str, _: &str, _: &str) -> Result<()> {
    self.record("collection resources")
  }

  async fn remove_from_collection(&self, _: &str, _: &str, _: &str) -> Result<()> {
    self.record("collection resources")
  }

  async fn collection_resources(&self, _: &str, collection_id: &str) -> Result<Vec<Resource>> {
    self.record("collection resources")?;
    let ids = self
      .collections
      .iter()
      .find(|c| c.id == collection_id)
      .map(|c| c.resource_ids.clone())
      .unwrap_or_default();
    Ok(self.resources.lock().unwrap().iter().filter(|r| ids.contains(&r.id)).cloned().collect())
  }

  async fn liked_resources(&self, _user_id: &str) -> Result<Vec<String>> {
    self.record("liked")?;
    Ok(self.liked.clone())
  }

  async fn downloaded_resources(&self, _user_id: &str) -> Result<Vec<String>> {
    self.record("downloaded")?;
    Ok(self.downloaded.clone())
  }

  async fn resource_comments(&self, resource_id: &str) -> Result<Vec<Comment>> {
    self.record("comments")?;
    Ok(self.comments.iter().filter(|c| c.resource_id == resource_id).cloned().collect())
  }

  async fn add_comment(
    &self,
    resource_id: &str,
    user_id: &str,
    content: &str,
    parent_id: Option<&str>,
  ) -> Result<Comment> {
    self.record("comments")?;
    Ok(Comment {
      id:          format!("com-{}", self.call_count()),
      resource_id: resource_id.to_string(),
      user_id:     user_id.to_string(),
      author:      "Ada".into(),
      content:     content.to_string(),
      date_added:  "2024-01-01T00:00:00.000Z".into(),
      likes:       0,
      parent_id:   parent_id.map(str::to_string),
    })
  }

  async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment> {
    self.record("comment")?;
    let mut comment = self
      .comments
      .iter()
      .find(|c| c.id == comment_id)
      .cloned()
      .ok_or_else(|| HubError::Http { status: 404, url: format!("mock://comments/{comment_id}") })?;
    comment.content = content.to_string();
    Ok(comment)
  }

  async fn delete_comment(&self, _: &str, _: &str) -> Result<()> { self.record("comment") }

  async fn like_comment(&self, comment_id: &str, _user_id: &str) -> Result<LikeCount> {
    self.record_gated("comment like").await?;
    let likes = self.comments.iter().find(|c| c.id == comment_id).map_or(0, |c| c.likes);
    Ok(LikeCount { likes: likes + 1 })
  }

  async fn user_notifications(&self, _user_id: &str) -> Result<Vec<Notification>> {
    self.record("notifications")?;
    Ok(self.notifications.clone())
  }

  async fn mark_notification_read(&self, _: &str, _: &str) -> Result<()> {
    self.record("notification")
  }

  async fn mark_all_notifications_read(&self, _: &str) -> Result<()> {
    self.record("notifications")
  }

  async fn delete_notification(&self, _: &str, _: &str) -> Result<()> {
    self.record("notification")
  }
}
