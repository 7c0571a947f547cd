//! Advanced search parameters, local filtering and sorting.
//!
//! [`SearchParams`] is what the advanced-search endpoint takes. When that endpoint
//! cannot be reached the same parameters are applied locally: every supplied field
//! becomes one [`Criterion`], and a resource survives only if it satisfies all of
//! them. An absent (or empty) field contributes no criterion at all.
//!
//! Sorting is deliberately separate ([`sort_resources`]) and left to the caller.
//!
//! # Examples
//!
//! ```
//! use resourcehub::{
//!   catalog::fallback_resources,
//!   resource::License,
//!   search::{sort_resources, SearchParams, SortKey, SortOrder},
//! };
//!
//! let params = SearchParams::new().with_category("fonts").with_license(License::Free);
//! let mut fonts = params.filter(&fallback_resources());
//! sort_resources(&mut fonts, SortKey::Popular, SortOrder::Desc);
//! assert!(fonts.iter().all(|r| r.category == "fonts" && r.license == License::Free));
//! ```

use std::cmp::Ordering;

use super::*;

/// Milliseconds in one day.
const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

lazy_static! {
  /// Number (with optional thousands separators) and optional unit of a human
  /// readable size such as `"1.2 GB"` or `"1,200 KiB"`.
  static ref FILE_SIZE: Regex =
    Regex::new(r"^\s*(\d[\d,]*(?:\.\d+)?)\s*([[:alpha:]]*)\s*$").unwrap();
}

/// Parses a human readable size into megabytes.
///
/// Units are binary multiples and case insensitive, written as `KB`/`KiB`, `MB`/`MiB`
/// and so on, or spelled out (`kilobytes`). A bare number is taken to be megabytes
/// already. An unknown unit yields `None`.
///
/// ```
/// use resourcehub::search::parse_file_size_mb;
///
/// assert_eq!(parse_file_size_mb("45 MB"), Some(45.0));
/// assert_eq!(parse_file_size_mb("1.5 GB"), Some(1536.0));
/// assert_eq!(parse_file_size_mb("512KiB"), Some(0.5));
/// assert_eq!(parse_file_size_mb("unknown"), None);
/// ```
pub fn parse_file_size_mb(size: &str) -> Option<f64> {
  let captures = FILE_SIZE.captures(size)?;
  let value: f64 = captures.get(1)?.as_str().replace(',', "").parse().ok()?;
  let unit = captures.get(2).map_or(String::new(), |m| m.as_str().to_lowercase());
  let factor = match unit.as_str() {
    "b" | "byte" | "bytes" => 1.0 / (1024.0 * 1024.0),
    "kb" | "kib" | "kilobyte" | "kilobytes" => 1.0 / 1024.0,
    "" | "mb" | "mib" | "megabyte" | "megabytes" => 1.0,
    "gb" | "gib" | "gigabyte" | "gigabytes" => 1024.0,
    "tb" | "tib" | "terabyte" | "terabytes" => 1024.0 * 1024.0,
    _ => return None,
  };
  Some(value * factor)
}

/// How recently a resource must have been added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBucket {
  /// Within the last 7 days
  Week,
  /// Within the last 30 days
  Month,
  /// Within the last 365 days
  Year,
}

impl DateBucket {
  /// Largest age, in whole days, that still falls inside the bucket.
  pub fn max_days(self) -> i64 {
    match self {
      DateBucket::Week => 7,
      DateBucket::Month => 30,
      DateBucket::Year => 365,
    }
  }
}

impl Display for DateBucket {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DateBucket::Week => write!(f, "week"),
      DateBucket::Month => write!(f, "month"),
      DateBucket::Year => write!(f, "year"),
    }
  }
}

impl FromStr for DateBucket {
  type Err = HubError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "week" => Ok(DateBucket::Week),
      "month" => Ok(DateBucket::Month),
      "year" => Ok(DateBucket::Year),
      other => Err(HubError::InvalidParameter(format!("unknown date range \"{other}\""))),
    }
  }
}

/// Orderings offered by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
  /// Most recently added first
  #[default]
  #[serde(rename = "newest")]
  Newest,
  /// Most liked first
  #[serde(rename = "popular")]
  Popular,
  /// Most downloaded first
  #[serde(rename = "downloads")]
  Downloads,
  /// Best rated first; unrated resources count as 0
  #[serde(rename = "rating")]
  Rating,
  /// Title, alphabetical
  #[serde(rename = "a-z")]
  AToZ,
  /// Title, reverse alphabetical
  #[serde(rename = "z-a")]
  ZToA,
}

impl Display for SortKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      SortKey::Newest => "newest",
      SortKey::Popular => "popular",
      SortKey::Downloads => "downloads",
      SortKey::Rating => "rating",
      SortKey::AToZ => "a-z",
      SortKey::ZToA => "z-a",
    };
    write!(f, "{s}")
  }
}

impl FromStr for SortKey {
  type Err = HubError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "newest" => Ok(SortKey::Newest),
      "popular" => Ok(SortKey::Popular),
      "downloads" => Ok(SortKey::Downloads),
      "rating" => Ok(SortKey::Rating),
      "a-z" => Ok(SortKey::AToZ),
      "z-a" => Ok(SortKey::ZToA),
      other => Err(HubError::InvalidParameter(format!("unknown sort key \"{other}\""))),
    }
  }
}

/// Direction for the numeric and date sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  /// Smallest / oldest first
  Asc,
  /// Largest / newest first
  #[default]
  Desc,
}

impl Display for SortOrder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SortOrder::Asc => write!(f, "asc"),
      SortOrder::Desc => write!(f, "desc"),
    }
  }
}

impl FromStr for SortOrder {
  type Err = HubError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "asc" => Ok(SortOrder::Asc),
      "desc" => Ok(SortOrder::Desc),
      other => Err(HubError::InvalidParameter(format!("unknown sort order \"{other}\""))),
    }
  }
}

/// Parameters of an advanced search.
///
/// File sizes are in megabytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
  /// Free text matched against title, description and tags
  pub query:         Option<String>,
  /// Exact category
  pub category:      Option<String>,
  /// Exact license
  pub license:       Option<License>,
  /// Substring of the resource format
  pub format:        Option<String>,
  /// Maximum age bucket
  pub date_added:    Option<DateBucket>,
  /// Requested ordering, forwarded to the backend
  pub sort_by:       Option<SortKey>,
  /// Requested direction, forwarded to the backend
  pub sort_order:    Option<SortOrder>,
  /// Smallest size in MB
  pub min_file_size: Option<f64>,
  /// Largest size in MB
  pub max_file_size: Option<f64>,
  /// Colours, any of which may match
  #[serde(default)]
  pub colors:        Vec<String>,
}

impl SearchParams {
  /// Parameters that match everything.
  pub fn new() -> Self { Self::default() }

  /// Sets the free-text query.
  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = Some(query.into());
    self
  }

  /// Sets the category.
  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  /// Sets the license.
  pub fn with_license(mut self, license: License) -> Self {
    self.license = Some(license);
    self
  }

  /// Sets the format.
  pub fn with_format(mut self, format: impl Into<String>) -> Self {
    self.format = Some(format.into());
    self
  }

  /// Sets the date bucket.
  pub fn with_date_added(mut self, bucket: DateBucket) -> Self {
    self.date_added = Some(bucket);
    self
  }

  /// Sets the sort key and direction.
  pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
    self.sort_by = Some(key);
    self.sort_order = Some(order);
    self
  }

  /// Sets the size bounds, in megabytes.
  pub fn with_file_size(mut self, min: Option<f64>, max: Option<f64>) -> Self {
    self.min_file_size = min;
    self.max_file_size = max;
    self
  }

  /// Adds a colour.
  pub fn with_color(mut self, color: impl Into<String>) -> Self {
    self.colors.push(color.into());
    self
  }

  /// Whether no filtering field is set (sorting alone does not count).
  pub fn is_unfiltered(&self) -> bool { self.criteria().is_empty() }

  /// Serializes the parameters as query-string pairs for the search endpoint.
  ///
  /// Empty values are left out; colours are comma-joined.
  pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    let mut push = |name: &'static str, value: Option<String>| {
      if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((name, value));
      }
    };
    push("q", self.query.clone());
    push("category", self.category.clone());
    push("license", self.license.map(|l| l.to_string()));
    push("format", self.format.clone());
    push("dateAdded", self.date_added.map(|d| d.to_string()));
    push("sortBy", self.sort_by.map(|s| s.to_string()));
    push("sortOrder", self.sort_order.map(|s| s.to_string()));
    push("minFileSize", self.min_file_size.map(|s| s.to_string()));
    push("maxFileSize", self.max_file_size.map(|s| s.to_string()));
    push("colors", Some(self.selected_colors().join(",")));
    pairs
  }

  /// Trimmed, non-empty colours.
  fn selected_colors(&self) -> Vec<String> {
    self.colors.iter().map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect()
  }

  /// One criterion per supplied field.
  pub fn criteria(&self) -> Vec<Criterion> {
    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
    let colors = self.selected_colors();
    let file_size = (self.min_file_size.is_some() || self.max_file_size.is_some())
      .then_some(Criterion::FileSize { min: self.min_file_size, max: self.max_file_size });

    [
      non_empty(&self.query).map(|q| Criterion::Text(q.to_lowercase())),
      non_empty(&self.category).map(Criterion::Category),
      self.license.map(Criterion::License),
      non_empty(&self.format).map(|f| Criterion::Format(f.to_lowercase())),
      self.date_added.map(Criterion::Added),
      file_size,
      (!colors.is_empty())
        .then(|| Criterion::Colors(colors.iter().map(|c| c.to_lowercase()).collect())),
    ]
    .into_iter()
    .flatten()
    .collect()
  }

  /// Keeps the resources that satisfy every criterion, evaluated against the current time.
  pub fn filter(&self, resources: &[Resource]) -> Vec<Resource> {
    self.filter_at(resources, Utc::now())
  }

  /// Like [`SearchParams::filter`] with an explicit "now" for the date criterion.
  pub fn filter_at(&self, resources: &[Resource], now: DateTime<Utc>) -> Vec<Resource> {
    let criteria = self.criteria();
    resources
      .iter()
      .filter(|resource| criteria.iter().all(|criterion| criterion.matches(resource, now)))
      .cloned()
      .collect()
  }
}

/// A single filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
  /// Lowercase needle in title, description or any tag
  Text(String),
  /// Exact category
  Category(String),
  /// Exact license
  License(License),
  /// Lowercase needle in the format; resources without a format pass
  Format(String),
  /// Age bucket; resources with an unparseable date pass
  Added(DateBucket),
  /// Size bounds in MB; resources with an unparseable size pass
  FileSize {
    /// Inclusive lower bound
    min: Option<f64>,
    /// Inclusive upper bound
    max: Option<f64>,
  },
  /// Lowercase colours, any of which must appear in a resource colour; resources
  /// without colours pass
  Colors(Vec<String>),
}

impl Criterion {
  /// Evaluates the predicate.
  pub fn matches(&self, resource: &Resource, now: DateTime<Utc>) -> bool {
    match self {
      Criterion::Text(needle) => resource.matches_text(needle),
      Criterion::Category(category) => resource.category == *category,
      Criterion::License(license) => resource.license == *license,
      Criterion::Format(needle) =>
        resource.format.as_ref().map_or(true, |format| format.to_lowercase().contains(needle)),
      Criterion::Added(bucket) => resource.added_at().map_or(true, |added| {
        let millis = (now - added).num_milliseconds().abs();
        let days = (millis + DAY_MILLIS - 1) / DAY_MILLIS;
        days <= bucket.max_days()
      }),
      Criterion::FileSize { min, max } => resource.file_size_mb().map_or(true, |size| {
        min.map_or(true, |min| size >= min) && max.map_or(true, |max| size <= max)
      }),
      Criterion::Colors(selected) => resource.colors.as_ref().map_or(true, |colors| {
        selected.iter().any(|wanted| colors.iter().any(|c| c.to_lowercase().contains(wanted)))
      }),
    }
  }
}

/// Sorts resources in place.
///
/// `order` applies to the numeric and date keys; `a-z` and `z-a` carry their own
/// direction. The sort is stable, so ties keep their input order.
pub fn sort_resources(resources: &mut [Resource], key: SortKey, order: SortOrder) {
  match key {
    SortKey::AToZ => resources.sort_by(title_ordering),
    SortKey::ZToA => resources.sort_by(|a, b| title_ordering(b, a)),
    _ => resources.sort_by(|a, b| {
      let ascending = match key {
        SortKey::Popular => a.likes.cmp(&b.likes),
        SortKey::Downloads => a.downloads.cmp(&b.downloads),
        SortKey::Rating =>
          a.average_rating.unwrap_or(0.0).total_cmp(&b.average_rating.unwrap_or(0.0)),
        _ => a.added_at().cmp(&b.added_at()),
      };
      match order {
        SortOrder::Asc => ascending,
        SortOrder::Desc => ascending.reverse(),
      }
    }),
  }
}

/// Convenience for callers that only care about the ordering of ids.
pub fn sorted_ids(resources: &[Resource], key: SortKey, order: SortOrder) -> Vec<String> {
  let mut sorted = resources.to_vec();
  sort_resources(&mut sorted, key, order);
  sorted.into_iter().map(|r| r.id).collect()
}

/// Orders two resources by title, case-insensitively.
pub fn title_ordering(a: &Resource, b: &Resource) -> Ordering {
  a.title.to_lowercase().cmp(&b.title.to_lowercase())
}
