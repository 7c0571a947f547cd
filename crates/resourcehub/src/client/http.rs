//! [`RemoteClient`] over HTTP.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use super::*;

/// REST client for the ResourceHub backend.
///
/// Every request and response body is JSON. Failures are logged once here and handed
/// back untouched; falling back is the caller's business.
///
/// ```no_run
/// use resourcehub::client::{HttpClient, RemoteClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new("http://localhost:3001/api")?;
/// let resources = client.all_resources().await?;
/// println!("{} resources", resources.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
  /// Shared connection pool
  client:   reqwest::Client,
  /// Base every endpoint path is appended to
  base_url: Url,
}

impl HttpClient {
  /// Creates a client for the backend at `base_url`.
  ///
  /// # Errors
  ///
  /// Fails when `base_url` is not an absolute URL that paths can be appended to.
  pub fn new(base_url: &str) -> Result<Self> {
    let base_url = Url::parse(base_url)?;
    if base_url.cannot_be_a_base() {
      return Err(HubError::InvalidParameter(format!("\"{base_url}\" cannot be used as a base URL")));
    }
    Ok(Self { client: reqwest::Client::new(), base_url })
  }

  /// The configured base URL.
  pub fn base_url(&self) -> &Url { &self.base_url }

  /// Builds the URL of an endpoint, percent-encoding each segment.
  fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    // `new` rejects cannot-be-a-base URLs, so segments are always available
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  /// Sends a request and checks the status.
  async fn execute(&self, method: Method, url: Url, body: Option<Value>) -> Result<reqwest::Response> {
    debug!("{method} {url}");
    let mut request = self.client.request(method.clone(), url.clone());
    if let Some(body) = body {
      request = request.json(&body);
    }

    let response = request.send().await.map_err(|e| {
      warn!("{method} {url} failed: {e}");
      HubError::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
      warn!("{method} {url} answered {status}");
      return Err(HubError::Http { status: status.as_u16(), url: url.to_string() });
    }
    Ok(response)
  }

  /// Sends a request and decodes the JSON response.
  async fn fetch<T: DeserializeOwned>(
    &self,
    method: Method,
    url: Url,
    body: Option<Value>,
  ) -> Result<T> {
    let response = self.execute(method, url.clone(), body).await?;
    response.json::<T>().await.map_err(|e| {
      warn!("Unexpected response body from {url}: {e}");
      HubError::from(e)
    })
  }

  /// Sends a request whose response body carries nothing we need.
  async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<()> {
    self.execute(method, url, body).await.map(|_| ())
  }
}

#[async_trait]
impl RemoteClient for HttpClient {
  async fn all_resources(&self) -> Result<Vec<Resource>> {
    self.fetch(Method::GET, self.endpoint(&["resources"]), None).await
  }

  async fn resource(&self, id: &str) -> Result<Resource> {
    self.fetch(Method::GET, self.endpoint(&["resources", id]), None).await
  }

  async fn search_resources(&self, query: &str) -> Result<Vec<Resource>> {
    let mut url = self.endpoint(&["resources", "search"]);
    url.query_pairs_mut().append_pair("q", query);
    self.fetch(Method::GET, url, None).await
  }

  async fn advanced_search(&self, params: &SearchParams) -> Result<Vec<Resource>> {
    let mut url = self.endpoint(&["resources", "search"]);
    let pairs = params.to_query_pairs();
    if !pairs.is_empty() {
      url.query_pairs_mut().extend_pairs(pairs);
    }
    self.fetch(Method::GET, url, None).await
  }

  async fn resources_by_category(&self, category: &str) -> Result<Vec<Resource>> {
    self.fetch(Method::GET, self.endpoint(&["resources", "category", category]), None).await
  }

  async fn toggle_like(&self, id: &str, user_id: &str) -> Result<LikeCount> {
    let url = self.endpoint(&["resources", id, "like"]);
    self.fetch(Method::POST, url, Some(json!({ "userId": user_id }))).await
  }

  async fn record_download(&self, id: &str, user_id: &str) -> Result<DownloadCount> {
    let url = self.endpoint(&["resources", id, "download"]);
    self.fetch(Method::POST, url, Some(json!({ "userId": user_id }))).await
  }

  async fn rate_resource(&self, id: &str, user_id: &str, rating: Rating) -> Result<RatingSummary> {
    let url = self.endpoint(&["resources", id, "rate"]);
    let body = json!({ "userId": user_id, "rating": rating.value() });
    self.fetch(Method::POST, url, Some(body)).await
  }

  async fn resource_ratings(&self, id: &str) -> Result<RatingSummary> {
    self.fetch(Method::GET, self.endpoint(&["resources", id, "ratings"]), None).await
  }

  async fn create_collection(&self, user_id: &str, draft: &NewCollection) -> Result<Collection> {
    let url = self.endpoint(&["users", user_id, "collections"]);
    self.fetch(Method::POST, url, Some(serde_json::to_value(draft)?)).await
  }

  async fn user_collections(&self, user_id: &str) -> Result<Vec<Collection>> {
    self.fetch(Method::GET, self.endpoint(&["users", user_id, "collections"]), None).await
  }

  async fn add_to_collection(
    &self,
    user_id: &str,
    collection_id: &str,
    resource_id: &str,
  ) -> Result<()> {
    let url = self.endpoint(&["users", user_id, "collections", collection_id, "resources"]);
    self.send(Method::POST, url, Some(json!({ "resourceId": resource_id }))).await
  }

  async fn remove_from_collection(
    &self,
    user_id: &str,
    collection_id: &str,
    resource_id: &str,
  ) -> Result<()> {
    let url =
      self.endpoint(&["users", user_id, "collections", collection_id, "resources", resource_id]);
    self.send(Method::DELETE, url, None).await
  }

  async fn collection_resources(
    &self,
    user_id: &str,
    collection_id: &str,
  ) -> Result<Vec<Resource>> {
    let url = self.endpoint(&["users", user_id, "collections", collection_id, "resources"]);
    self.fetch(Method::GET, url, None).await
  }

  async fn liked_resources(&self, user_id: &str) -> Result<Vec<String>> {
    let url = self.endpoint(&["users", user_id, "liked-resources"]);
    let ids: ResourceIds = self.fetch(Method::GET, url, None).await?;
    Ok(ids.resource_ids)
  }

  async fn downloaded_resources(&self, user_id: &str) -> Result<Vec<String>> {
    let url = self.endpoint(&["users", user_id, "downloaded-resources"]);
    let ids: ResourceIds = self.fetch(Method::GET, url, None).await?;
    Ok(ids.resource_ids)
  }

  async fn resource_comments(&self, resource_id: &str) -> Result<Vec<Comment>> {
    self.fetch(Method::GET, self.endpoint(&["resources", resource_id, "comments"]), None).await
  }

  async fn add_comment(
    &self,
    resource_id: &str,
    user_id: &str,
    content: &str,
    parent_id: Option<&str>,
  ) -> Result<Comment> {
    let url = self.endpoint(&["resources", resource_id, "comments"]);
    let body = json!({ "userId": user_id, "content": content, "parentId": parent_id });
    self.fetch(Method::POST, url, Some(body)).await
  }

  async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment> {
    let url = self.endpoint(&["comments", comment_id]);
    self.fetch(Method::PATCH, url, Some(json!({ "content": content }))).await
  }

  async fn delete_comment(&self, comment_id: &str, user_id: &str) -> Result<()> {
    let url = self.endpoint(&["comments", comment_id]);
    self.send(Method::DELETE, url, Some(json!({ "userId": user_id }))).await
  }

  async fn like_comment(&self, comment_id: &str, user_id: &str) -> Result<LikeCount> {
    let url = self.endpoint(&["comments", comment_id, "like"]);
    self.fetch(Method::POST, url, Some(json!({ "userId": user_id }))).await
  }

  async fn user_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
    self.fetch(Method::GET, self.endpoint(&["users", user_id, "notifications"]), None).await
  }

  async fn mark_notification_read(&self, notification_id: &str, user_id: &str) -> Result<()> {
    let url = self.endpoint(&["notifications", notification_id, "read"]);
    self.send(Method::POST, url, Some(json!({ "userId": user_id }))).await
  }

  async fn mark_all_notifications_read(&self, user_id: &str) -> Result<()> {
    let url = self.endpoint(&["users", user_id, "notifications", "read-all"]);
    self.send(Method::POST, url, Some(json!({ "userId": user_id }))).await
  }

  async fn delete_notification(&self, notification_id: &str, user_id: &str) -> Result<()> {
    let url = self.endpoint(&["notifications", notification_id]);
    self.send(Method::DELETE, url, Some(json!({ "userId": user_id }))).await
  }
}
