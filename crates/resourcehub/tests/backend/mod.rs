//! A throwaway ResourceHub backend served on a random local port.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  routing::{delete, get, patch, post},
  Json, Router,
};
use resourcehub::{catalog::fallback_resources, resource::Resource};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Shared state of the fake backend.
#[derive(Clone, Default)]
pub struct Backend {
  /// `(route, body or query)` of every request, in arrival order
  pub requests: Arc<Mutex<Vec<(String, Value)>>>,
  /// Like counters per resource id
  likes:        Arc<Mutex<HashMap<String, u64>>>,
  /// Ids served by the liked endpoint
  pub liked:    Arc<Mutex<Vec<String>>>,
}

impl Backend {
  fn record(&self, route: impl Into<String>, payload: Value) {
    self.requests.lock().unwrap().push((route.into(), payload));
  }

  /// Payload of the last request to `route`.
  pub fn last(&self, route: &str) -> Option<Value> {
    let requests = self.requests.lock().unwrap();
    requests.iter().rev().find(|(r, _)| r == route).map(|(_, payload)| payload.clone())
  }

  /// Serves the backend and returns its API base URL.
  pub async fn spawn(self) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = Router::new()
      .route("/api/resources", get(all_resources))
      .route("/api/resources/search", get(search))
      .route("/api/resources/{id}/like", post(like))
      .route("/api/resources/{id}/ratings", get(missing))
      .route("/api/resources/{id}/comments", post(add_comment))
      .route("/api/comments/{id}", patch(update_comment))
      .route("/api/users/{uid}/liked-resources", get(liked))
      .route("/api/users/{uid}/downloaded-resources", get(downloaded))
      .route("/api/notifications/{id}", delete(delete_notification))
      .with_state(self);

    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{address}/api")
  }
}

async fn all_resources() -> Json<Vec<Resource>> { Json(fallback_resources()) }

async fn search(
  State(backend): State<Backend>,
  Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Resource>> {
  backend.record("search", json!(params));
  let resources = fallback_resources()
    .into_iter()
    .filter(|r| params.get("category").map_or(true, |c| &r.category == c))
    .collect();
  Json(resources)
}

async fn like(
  State(backend): State<Backend>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Json<Value> {
  backend.record("like", body);
  let mut likes = backend.likes.lock().unwrap();
  let count = likes.entry(id).or_default();
  *count += 1;
  Json(json!({ "likes": *count }))
}

async fn missing() -> StatusCode { StatusCode::NOT_FOUND }

async fn add_comment(
  State(backend): State<Backend>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Json<Value> {
  backend.record("add comment", body.clone());
  Json(json!({
    "id": "com-1",
    "resourceId": id,
    "userId": body["userId"],
    "author": "Ada",
    "content": body["content"],
    "dateAdded": "2024-03-01T12:00:00.000Z",
    "likes": 0,
    "parentId": body["parentId"],
  }))
}

async fn update_comment(
  State(backend): State<Backend>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Json<Value> {
  backend.record("update comment", body.clone());
  Json(json!({
    "id": id,
    "resourceId": "1",
    "userId": "u1",
    "author": "Ada",
    "content": body["content"],
    "dateAdded": "2024-03-01T12:00:00.000Z",
    "likes": 4,
  }))
}

async fn liked(State(backend): State<Backend>, Path(uid): Path<String>) -> Json<Value> {
  backend.record("liked", json!(uid));
  let ids = backend.liked.lock().unwrap().clone();
  Json(json!({ "resourceIds": ids }))
}

async fn downloaded() -> Json<Value> { Json(json!({})) }

async fn delete_notification(
  State(backend): State<Backend>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> StatusCode {
  backend.record("delete notification", json!({ "id": id, "body": body }));
  StatusCode::NO_CONTENT
}
