use serde_json::json;

use super::{backend::Backend, *};

async fn client_for(backend: &Backend) -> HttpClient {
  HttpClient::new(&backend.clone().spawn().await).unwrap()
}

#[tokio::test]
async fn test_all_resources_decode() -> anyhow::Result<()> {
  let client = client_for(&Backend::default()).await;
  assert_eq!(client.all_resources().await?, fallback_resources());
  Ok(())
}

#[tokio::test]
async fn test_like_sends_user_id() -> anyhow::Result<()> {
  let backend = Backend::default();
  let client = client_for(&backend).await;

  assert_eq!(client.toggle_like("1", "u1").await?.likes, 1);
  assert_eq!(client.toggle_like("1", "u1").await?.likes, 2);
  assert_eq!(backend.last("like"), Some(json!({ "userId": "u1" })));
  Ok(())
}

#[tokio::test]
async fn test_engagement_ids_decode() -> anyhow::Result<()> {
  let backend = Backend::default();
  *backend.liked.lock().unwrap() = vec!["1".into(), "3".into()];
  let client = client_for(&backend).await;

  assert_eq!(client.liked_resources("u1").await?, ["1", "3"]);
  assert_eq!(backend.last("liked"), Some(json!("u1")));
  // a body without `resourceIds` means none
  assert!(client.downloaded_resources("u1").await?.is_empty());
  Ok(())
}

#[tokio::test]
async fn test_advanced_search_forwards_every_parameter() -> anyhow::Result<()> {
  let backend = Backend::default();
  let client = client_for(&backend).await;
  let params = SearchParams::new()
    .with_query("sans")
    .with_category("fonts")
    .with_license(License::Free)
    .with_sort(SortKey::Popular, SortOrder::Asc)
    .with_file_size(Some(1.5), None)
    .with_color("blue")
    .with_color("red");

  let results = client.advanced_search(&params).await?;
  assert!(results.iter().all(|r| r.category == "fonts"));
  assert_eq!(
    backend.last("search"),
    Some(json!({
      "q": "sans",
      "category": "fonts",
      "license": "free",
      "sortBy": "popular",
      "sortOrder": "asc",
      "minFileSize": "1.5",
      "colors": "blue,red",
    }))
  );
  Ok(())
}

#[tokio::test]
async fn test_plain_search_sends_query() -> anyhow::Result<()> {
  let backend = Backend::default();
  let client = client_for(&backend).await;
  client.search_resources("kit & icons").await?;
  assert_eq!(backend.last("search"), Some(json!({ "q": "kit & icons" })));
  Ok(())
}

#[tokio::test]
async fn test_error_status_becomes_http_error() {
  let client = client_for(&Backend::default()).await;
  match client.resource_ratings("1").await {
    Err(HubError::Http { status, url }) => {
      assert_eq!(status, 404);
      assert!(url.ends_with("/api/resources/1/ratings"));
    },
    other => panic!("expected an HTTP error, got {other:?}"),
  }
}

#[tokio::test]
async fn test_comment_bodies() -> anyhow::Result<()> {
  let backend = Backend::default();
  let client = client_for(&backend).await;

  let top = client.add_comment("1", "u1", "Lovely", None).await?;
  assert!(top.is_top_level());
  assert_eq!(
    backend.last("add comment"),
    Some(json!({ "userId": "u1", "content": "Lovely", "parentId": null }))
  );

  let reply = client.add_comment("1", "u1", "Agreed", Some("com-0")).await?;
  assert_eq!(reply.parent_id.as_deref(), Some("com-0"));

  let edited = client.update_comment("com-1", "Edited").await?;
  assert_eq!(edited.content, "Edited");
  assert_eq!(backend.last("update comment"), Some(json!({ "content": "Edited" })));
  Ok(())
}

#[tokio::test]
async fn test_delete_sends_user_id() -> anyhow::Result<()> {
  let backend = Backend::default();
  let client = client_for(&backend).await;

  client.delete_notification("n1", "u1").await?;
  assert_eq!(
    backend.last("delete notification"),
    Some(json!({ "id": "n1", "body": { "userId": "u1" } }))
  );
  Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
  let client = HttpClient::new(UNREACHABLE_API).unwrap();
  assert!(matches!(client.all_resources().await, Err(HubError::Network(_))));
}
