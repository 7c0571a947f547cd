//! Module for the advanced search.

use super::*;

/// Options of [`Commands::Search`]
#[derive(Args, Clone)]
pub struct SearchOptions {
  /// Free text matched against title, description and tags
  #[arg(long, short)]
  pub query: Option<String>,

  /// Category, e.g. `fonts` or `templates`
  #[arg(long)]
  pub category: Option<String>,

  /// License tier (free, premium, commercial)
  #[arg(long)]
  pub license: Option<License>,

  /// File format, e.g. `PNG`
  #[arg(long)]
  pub format: Option<String>,

  /// Only resources added within the last week, month or year
  #[arg(long)]
  pub added: Option<DateBucket>,

  /// Ordering (newest, popular, downloads, rating, a-z, z-a)
  #[arg(long, short)]
  pub sort: Option<SortKey>,

  /// Direction of the ordering (asc, desc)
  #[arg(long)]
  pub order: Option<SortOrder>,

  /// Smallest file size, in megabytes
  #[arg(long)]
  pub min_size: Option<f64>,

  /// Largest file size, in megabytes
  #[arg(long)]
  pub max_size: Option<f64>,

  /// Colour the resource must carry, repeatable
  #[arg(long = "color")]
  pub colors: Vec<String>,
}

impl SearchOptions {
  /// Builds the search parameters these options describe.
  fn params(&self) -> SearchParams {
    let mut params = SearchParams::new().with_file_size(self.min_size, self.max_size);
    if let Some(query) = &self.query {
      params = params.with_query(query);
    }
    if let Some(category) = &self.category {
      params = params.with_category(category);
    }
    if let Some(license) = self.license {
      params = params.with_license(license);
    }
    if let Some(format) = &self.format {
      params = params.with_format(format);
    }
    if let Some(bucket) = self.added {
      params = params.with_date_added(bucket);
    }
    if self.sort.is_some() || self.order.is_some() {
      params = params.with_sort(self.sort.unwrap_or_default(), self.order.unwrap_or_default());
    }
    self.colors.iter().fold(params, |params, color| params.with_color(color))
  }
}

/// Function for the [`Commands::Search`] in the CLI.
pub async fn search<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  search_options: SearchOptions,
) -> Result<()> {
  let params = search_options.params();
  debug!("Searching with {:?}", params.to_query_pairs());

  let mut resources = hub.advanced_search(&params).await;
  sort_resources(
    &mut resources,
    search_options.sort.unwrap_or_default(),
    search_options.order.unwrap_or_default(),
  );

  if !params.is_unfiltered() {
    let criteria = params
      .to_query_pairs()
      .into_iter()
      .filter(|(name, _)| !matches!(*name, "sortBy" | "sortOrder"))
      .map(|(name, value)| format!("{name}={value}"))
      .collect::<Vec<_>>();
    interaction.reply(ResponseContent::Info(&format!("Filtering by {}", criteria.join(", "))))?;
  }
  interaction.reply(ResponseContent::Resources(&resources))
}
