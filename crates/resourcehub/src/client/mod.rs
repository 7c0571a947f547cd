//! Remote access to the ResourceHub backend.
//!
//! [`RemoteClient`] is the seam between the [`Hub`](crate::Hub) and the REST backend:
//! one async method per endpoint, each returning the decoded JSON body or a
//! [`HubError`]. [`HttpClient`] is the production implementation; tests swap in
//! their own.
//!
//! # Endpoints
//!
//! | method | endpoint |
//! |---|---|
//! | [`all_resources`](RemoteClient::all_resources) | `GET /resources` |
//! | [`resource`](RemoteClient::resource) | `GET /resources/{id}` |
//! | [`search_resources`](RemoteClient::search_resources) | `GET /resources/search?q=` |
//! | [`advanced_search`](RemoteClient::advanced_search) | `GET /resources/search?...` |
//! | [`resources_by_category`](RemoteClient::resources_by_category) | `GET /resources/category/{category}` |
//! | [`toggle_like`](RemoteClient::toggle_like) | `POST /resources/{id}/like` |
//! | [`record_download`](RemoteClient::record_download) | `POST /resources/{id}/download` |
//! | [`rate_resource`](RemoteClient::rate_resource) | `POST /resources/{id}/rate` |
//! | [`resource_ratings`](RemoteClient::resource_ratings) | `GET /resources/{id}/ratings` |
//! | [`create_collection`](RemoteClient::create_collection) | `POST /users/{userId}/collections` |
//! | [`user_collections`](RemoteClient::user_collections) | `GET /users/{userId}/collections` |
//! | [`add_to_collection`](RemoteClient::add_to_collection) | `POST /users/{userId}/collections/{collectionId}/resources` |
//! | [`remove_from_collection`](RemoteClient::remove_from_collection) | `DELETE /users/{userId}/collections/{collectionId}/resources/{resourceId}` |
//! | [`collection_resources`](RemoteClient::collection_resources) | `GET /users/{userId}/collections/{collectionId}/resources` |
//! | [`liked_resources`](RemoteClient::liked_resources) | `GET /users/{userId}/liked-resources` |
//! | [`downloaded_resources`](RemoteClient::downloaded_resources) | `GET /users/{userId}/downloaded-resources` |
//! | [`resource_comments`](RemoteClient::resource_comments) | `GET /resources/{resourceId}/comments` |
//! | [`add_comment`](RemoteClient::add_comment) | `POST /resources/{resourceId}/comments` |
//! | [`update_comment`](RemoteClient::update_comment) | `PATCH /comments/{commentId}` |
//! | [`delete_comment`](RemoteClient::delete_comment) | `DELETE /comments/{commentId}` |
//! | [`like_comment`](RemoteClient::like_comment) | `POST /comments/{commentId}/like` |
//! | [`user_notifications`](RemoteClient::user_notifications) | `GET /users/{userId}/notifications` |
//! | [`mark_notification_read`](RemoteClient::mark_notification_read) | `POST /notifications/{id}/read` |
//! | [`mark_all_notifications_read`](RemoteClient::mark_all_notifications_read) | `POST /users/{userId}/notifications/read-all` |
//! | [`delete_notification`](RemoteClient::delete_notification) | `DELETE /notifications/{id}` |

use super::*;

mod http;
#[cfg(test)] pub(crate) mod mock;

pub use self::http::HttpClient;

/// Typed access to every backend endpoint the library uses.
///
/// Implementations surface transport failures as [`HubError::Network`] and non-success
/// statuses as [`HubError::Http`]; they do not retry or fall back.
#[async_trait]
pub trait RemoteClient: Send + Sync {
  /// Every resource.
  async fn all_resources(&self) -> Result<Vec<Resource>>;

  /// One resource by id.
  async fn resource(&self, id: &str) -> Result<Resource>;

  /// Plain free-text search.
  async fn search_resources(&self, query: &str) -> Result<Vec<Resource>>;

  /// Search with every parameter forwarded as a query pair.
  async fn advanced_search(&self, params: &SearchParams) -> Result<Vec<Resource>>;

  /// Resources of one category.
  async fn resources_by_category(&self, category: &str) -> Result<Vec<Resource>>;

  /// Likes or unlikes a resource on behalf of `user_id`.
  async fn toggle_like(&self, id: &str, user_id: &str) -> Result<LikeCount>;

  /// Records a download by `user_id`.
  async fn record_download(&self, id: &str, user_id: &str) -> Result<DownloadCount>;

  /// Submits `user_id`'s rating and returns the new aggregate.
  async fn rate_resource(&self, id: &str, user_id: &str, rating: Rating) -> Result<RatingSummary>;

  /// Current aggregate rating of a resource.
  async fn resource_ratings(&self, id: &str) -> Result<RatingSummary>;

  /// Creates a collection owned by `user_id`.
  async fn create_collection(&self, user_id: &str, draft: &NewCollection) -> Result<Collection>;

  /// Collections owned by `user_id`.
  async fn user_collections(&self, user_id: &str) -> Result<Vec<Collection>>;

  /// Appends a resource to a collection.
  async fn add_to_collection(
    &self,
    user_id: &str,
    collection_id: &str,
    resource_id: &str,
  ) -> Result<()>;

  /// Removes a resource from a collection.
  async fn remove_from_collection(
    &self,
    user_id: &str,
    collection_id: &str,
    resource_id: &str,
  ) -> Result<()>;

  /// Resources of one collection.
  async fn collection_resources(&self, user_id: &str, collection_id: &str)
    -> Result<Vec<Resource>>;

  /// Ids `user_id` has liked.
  async fn liked_resources(&self, user_id: &str) -> Result<Vec<String>>;

  /// Ids `user_id` has downloaded.
  async fn downloaded_resources(&self, user_id: &str) -> Result<Vec<String>>;

  /// Comments on a resource.
  async fn resource_comments(&self, resource_id: &str) -> Result<Vec<Comment>>;

  /// Posts a comment, or a reply when `parent_id` is given.
  async fn add_comment(
    &self,
    resource_id: &str,
    user_id: &str,
    content: &str,
    parent_id: Option<&str>,
  ) -> Result<Comment>;

  /// Replaces a comment's content.
  async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment>;

  /// Deletes a comment.
  async fn delete_comment(&self, comment_id: &str, user_id: &str) -> Result<()>;

  /// Likes a comment.
  async fn like_comment(&self, comment_id: &str, user_id: &str) -> Result<LikeCount>;

  /// Notifications addressed to `user_id`.
  async fn user_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

  /// Marks one notification as read.
  async fn mark_notification_read(&self, notification_id: &str, user_id: &str) -> Result<()>;

  /// Marks every notification of `user_id` as read.
  async fn mark_all_notifications_read(&self, user_id: &str) -> Result<()>;

  /// Deletes a notification.
  async fn delete_notification(&self, notification_id: &str, user_id: &str) -> Result<()>;
}
