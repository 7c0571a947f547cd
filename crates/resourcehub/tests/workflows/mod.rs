use super::{backend::Backend, *};

#[tokio::test]
async fn test_offline_hub_serves_catalog() {
  let (hub, _dir) = create_test_hub(UNREACHABLE_API).await;

  assert_eq!(hub.get_all().await, fallback_resources());
  assert_eq!(hub.get_by_id("6").map(|r| r.title), Some("E-commerce UI Kit".to_string()));
}

#[tokio::test]
async fn test_offline_search_filters_catalog_by_size() {
  let (hub, _dir) = create_test_hub(UNREACHABLE_API).await;

  let params = SearchParams::new().with_file_size(None, Some(5.0));
  let mut ids: Vec<_> = hub.advanced_search(&params).await.into_iter().map(|r| r.id).collect();
  ids.sort();
  assert_eq!(ids, ["1", "4", "5"]);

  let params = SearchParams::new().with_file_size(Some(1000.0), None);
  let ids: Vec<_> = hub.advanced_search(&params).await.into_iter().map(|r| r.id).collect();
  assert_eq!(ids, ["3"]);
}

#[tokio::test]
async fn test_offline_search_then_sort() {
  let (hub, _dir) = create_test_hub(UNREACHABLE_API).await;

  let params = SearchParams::new().with_category("templates");
  let mut results = hub.advanced_search(&params).await;
  resourcehub::search::sort_resources(&mut results, SortKey::AToZ, SortOrder::Desc);
  // a-z carries its own direction
  let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
  assert_eq!(titles, ["Business Landing Page Template", "E-commerce UI Kit"]);
}

#[tokio::test]
async fn test_likes_survive_a_backend_outage() -> anyhow::Result<()> {
  let dir = tempdir()?;
  let api = Backend::default().spawn().await;

  let online = create_hub_at(&api, &dir).await;
  online.sign_in(User::new("u1")).await;
  online.toggle_like("2").await?;
  online.toggle_like("5").await?;
  assert_eq!(online.get_by_id("2").map(|r| r.likes), Some(fallback_resources()[1].likes));
  drop(online);

  let cache = LocalCache::open(dir.path().join("cache.db")).await?;
  let expected = BTreeSet::from(["2".to_string(), "5".to_string()]);
  assert_eq!(cache.load_liked("u1").await?, Some(expected.clone()));

  // a fresh session against a dead backend picks the set up from disk
  let offline = create_hub_at(UNREACHABLE_API, &dir).await;
  offline.sign_in(User::new("u1")).await;
  assert_eq!(offline.snapshot().liked, expected);
  assert!(matches!(offline.toggle_like("2").await, Err(HubError::Network(_))));
  assert_eq!(offline.snapshot().liked, expected);
  Ok(())
}

#[tokio::test]
async fn test_sign_in_prefers_backend_over_disk() -> anyhow::Result<()> {
  let dir = tempdir()?;
  let backend = Backend::default();
  *backend.liked.lock().unwrap() = vec!["8".into()];
  let api = backend.spawn().await;

  LocalCache::open(dir.path().join("cache.db"))
    .await?
    .store_liked("u1", &BTreeSet::from(["1".to_string()]))
    .await?;

  let hub = create_hub_at(&api, &dir).await;
  hub.sign_in(User::new("u1")).await;
  assert_eq!(hub.snapshot().liked, BTreeSet::from(["8".to_string()]));
  Ok(())
}

#[tokio::test]
async fn test_hub_from_config_file() -> anyhow::Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("config.toml");
  Config::default()
    .with_api_base_url(UNREACHABLE_API)
    .with_cache_path(dir.path().join("data").join("cache.db"))
    .save(&path)?;

  let config = Config::load(Some(&path))?;
  let hub = Hub::builder().with_config(config).build().await?;
  assert_eq!(hub.get_all().await.len(), fallback_resources().len());
  assert!(dir.path().join("data").join("cache.db").exists());
  Ok(())
}

#[tokio::test]
async fn test_shared_hub_across_tasks() {
  let (hub, _dir) = create_test_hub(UNREACHABLE_API).await;
  let hub = Arc::new(hub);

  let tasks: Vec<_> = (0..4)
    .map(|_| {
      let hub = hub.clone();
      tokio::spawn(async move { hub.get_all().await.len() })
    })
    .collect();
  for task in tasks {
    assert_eq!(task.await.unwrap(), fallback_resources().len());
  }
}
