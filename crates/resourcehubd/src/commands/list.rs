//! Module for listing resources.

use super::*;

/// Options of [`Commands::List`]
#[derive(Args, Clone)]
pub struct ListOptions {
  /// Only resources whose title, description or tags contain this text
  #[arg(long)]
  pub query: Option<String>,

  /// Only resources of this category
  #[arg(long)]
  pub category: Option<String>,

  /// Ordering (newest, popular, downloads, rating, a-z, z-a)
  #[arg(long, default_value_t = SortKey::Newest)]
  pub sort: SortKey,

  /// Refetch instead of using the cached list
  #[arg(long)]
  pub refresh: bool,
}

/// Function for the [`Commands::List`] in the CLI.
pub async fn list<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  list_options: ListOptions,
) -> Result<()> {
  let ListOptions { query, category, sort, refresh } = list_options;

  if refresh {
    hub.refresh_resources().await;
  } else {
    hub.get_all().await;
  }
  hub.set_search_query(query.unwrap_or_default());
  hub.set_selected_category(category.unwrap_or_default());

  let mut resources = hub.filtered_resources();
  sort_resources(&mut resources, sort, SortOrder::Desc);
  interaction.reply(ResponseContent::Resources(&resources))
}
