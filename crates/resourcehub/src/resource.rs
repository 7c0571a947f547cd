//! Core marketplace types.
//!
//! Every type here mirrors a JSON document exchanged with the ResourceHub backend, so
//! field names are camelCase on the wire (`isPremium`, `dateAdded`, ...) while staying
//! snake_case in Rust.
//!
//! # Examples
//!
//! ```
//! use resourcehub::resource::{License, Resource};
//!
//! let json = r#"{
//!   "id": "res-1", "title": "Sans Font", "description": "A clean sans serif",
//!   "image": "/img/sans.png", "category": "fonts", "isPremium": false,
//!   "downloads": 10, "likes": 3, "tags": ["sans"], "author": "Ada",
//!   "dateAdded": "2024-01-15", "license": "free"
//! }"#;
//!
//! let resource: Resource = serde_json::from_str(json).unwrap();
//! assert_eq!(resource.license, License::Free);
//! assert!(resource.added_at().is_some());
//! ```

use chrono::{SecondsFormat, TimeZone};

use super::*;

/// Licensing tier of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
  /// Free for personal and commercial use
  #[default]
  Free,
  /// Requires a premium subscription
  Premium,
  /// Sold under a commercial license
  Commercial,
}

impl Display for License {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      License::Free => write!(f, "free"),
      License::Premium => write!(f, "premium"),
      License::Commercial => write!(f, "commercial"),
    }
  }
}

impl FromStr for License {
  type Err = HubError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "free" => Ok(License::Free),
      "premium" => Ok(License::Premium),
      "commercial" => Ok(License::Commercial),
      other => Err(HubError::InvalidParameter(format!("unknown license \"{other}\""))),
    }
  }
}

/// A design resource listed on the marketplace.
///
/// Resources are created by upload; their engagement counters are owned by the
/// backend and only ever patched locally from server responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
  /// Unique resource id
  pub id:             String,
  /// Display title
  pub title:          String,
  /// Longer description
  pub description:    String,
  /// Preview image URL
  pub image:          String,
  /// Marketplace category (e.g. `fonts`, `templates`)
  pub category:       String,
  /// Whether the resource sits behind the premium tier
  pub is_premium:     bool,
  /// Number of recorded downloads
  pub downloads:      u64,
  /// Number of likes
  pub likes:          u64,
  /// Free-form tags
  #[serde(default)]
  pub tags:           Vec<String>,
  /// Display name of the uploader
  pub author:         String,
  /// Upload date, RFC 3339 or `YYYY-MM-DD`
  pub date_added:     String,
  /// Human readable size, e.g. `"45 MB"`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file_size:      Option<String>,
  /// File format, e.g. `"TTF, OTF"`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format:         Option<String>,
  /// Licensing tier
  pub license:        License,
  /// Dominant colours, used for colour filtering
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub colors:         Option<Vec<String>>,
  /// Average rating from 0 to 5, as computed by the backend
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub average_rating: Option<f64>,
  /// Number of ratings behind `average_rating`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_ratings:  Option<u64>,
}

impl Resource {
  /// Parses [`Resource::date_added`], accepting RFC 3339 timestamps and plain dates.
  ///
  /// Returns `None` when the stored string is neither.
  pub fn added_at(&self) -> Option<DateTime<Utc>> { parse_date(&self.date_added) }

  /// The resource size normalised to megabytes, if the stored size can be parsed.
  pub fn file_size_mb(&self) -> Option<f64> {
    self.file_size.as_deref().and_then(search::parse_file_size_mb)
  }

  /// Case-insensitive substring match against title, description and tags.
  ///
  /// `needle` must already be lowercase.
  pub fn matches_text(&self, needle: &str) -> bool {
    self.title.to_lowercase().contains(needle)
      || self.description.to_lowercase().contains(needle)
      || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
  }
}

/// Parses a backend date string into a UTC timestamp.
pub(crate) fn parse_date(value: &str) -> Option<DateTime<Utc>> {
  if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
    return Some(datetime.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Current time formatted the way the backend stamps `dateUpdated`.
pub(crate) fn timestamp_now() -> String { Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true) }

/// Everything an uploader provides for a new resource.
///
/// The id, counters, author and upload date are filled in by
/// [`Hub::add_resource`](crate::Hub::add_resource).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
  /// Display title
  pub title:       String,
  /// Longer description
  pub description: String,
  /// Preview image URL
  pub image:       String,
  /// Marketplace category
  pub category:    String,
  /// Whether the resource sits behind the premium tier
  pub is_premium:  bool,
  /// Free-form tags
  #[serde(default)]
  pub tags:        Vec<String>,
  /// Human readable size
  #[serde(default)]
  pub file_size:   Option<String>,
  /// File format
  #[serde(default)]
  pub format:      Option<String>,
  /// Licensing tier
  pub license:     License,
  /// Dominant colours
  #[serde(default)]
  pub colors:      Option<Vec<String>>,
}

impl NewResource {
  /// Completes the draft into a [`Resource`] with zeroed counters.
  pub fn into_resource(self, id: String, author: String, date_added: String) -> Resource {
    Resource {
      id,
      title: self.title,
      description: self.description,
      image: self.image,
      category: self.category,
      is_premium: self.is_premium,
      downloads: 0,
      likes: 0,
      tags: self.tags,
      author,
      date_added,
      file_size: self.file_size,
      format: self.format,
      license: self.license,
      colors: self.colors,
      average_rating: None,
      total_ratings: None,
    }
  }
}

/// A user-owned, ordered group of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  /// Unique collection id
  pub id:           String,
  /// Display name
  pub name:         String,
  /// Optional description
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
  /// Owner of the collection
  pub user_id:      String,
  /// Member resources in insertion order; duplicates are not prevented
  #[serde(default)]
  pub resource_ids: Vec<String>,
  /// Creation timestamp
  pub date_created: String,
  /// Last membership change
  pub date_updated: String,
}

impl Collection {
  /// Whether `resource_id` is a member.
  pub fn contains(&self, resource_id: &str) -> bool {
    self.resource_ids.iter().any(|id| id == resource_id)
  }
}

/// Request body for creating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollection {
  /// Display name
  pub name:        String,
  /// Optional description
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// A comment on a resource, either top-level or a reply to a top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  /// Unique comment id
  pub id:          String,
  /// Resource the comment belongs to
  pub resource_id: String,
  /// Author's user id
  pub user_id:     String,
  /// Author's display name
  pub author:      String,
  /// Comment body
  pub content:     String,
  /// Creation timestamp
  pub date_added:  String,
  /// Number of likes
  #[serde(default)]
  pub likes:       u64,
  /// Parent comment for replies
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parent_id:   Option<String>,
}

/// Position of a comment in a two-level thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind<'a> {
  /// Starts a thread
  TopLevel,
  /// Answers the named top-level comment
  Reply {
    /// Id of the comment being answered
    parent_id: &'a str,
  },
}

impl Comment {
  /// Tagged view of [`Comment::parent_id`].
  pub fn kind(&self) -> CommentKind<'_> {
    match self.parent_id.as_deref() {
      Some(parent_id) => CommentKind::Reply { parent_id },
      None => CommentKind::TopLevel,
    }
  }

  /// Whether this comment starts a thread.
  pub fn is_top_level(&self) -> bool { matches!(self.kind(), CommentKind::TopLevel) }
}

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
  /// Neutral information
  Info,
  /// Something completed
  Success,
  /// Something needs attention
  Warning,
  /// Something failed
  Error,
  /// A followed resource changed
  ResourceUpdate,
}

impl Display for NotificationKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      NotificationKind::Info => "info",
      NotificationKind::Success => "success",
      NotificationKind::Warning => "warning",
      NotificationKind::Error => "error",
      NotificationKind::ResourceUpdate => "resource_update",
    };
    write!(f, "{s}")
  }
}

/// A message addressed to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  /// Unique notification id
  pub id:          String,
  /// Recipient
  pub user_id:     String,
  /// Short headline
  pub title:       String,
  /// Body text
  pub message:     String,
  /// Category, `type` on the wire
  #[serde(rename = "type")]
  pub kind:        NotificationKind,
  /// Whether the user has seen it
  pub read:        bool,
  /// Creation timestamp
  pub date_added:  String,
  /// Resource the notification is about, if any
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resource_id: Option<String>,
}

/// A star rating from 1 to 5.
///
/// ```
/// use resourcehub::resource::Rating;
///
/// assert_eq!(Rating::new(4).unwrap().value(), 4);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
  /// Validates a rating.
  pub fn new(value: u8) -> Result<Self> {
    if (1..=5).contains(&value) {
      Ok(Self(value))
    } else {
      Err(HubError::InvalidRating(value))
    }
  }

  /// The number of stars.
  pub fn value(self) -> u8 { self.0 }
}

impl TryFrom<u8> for Rating {
  type Error = HubError;

  fn try_from(value: u8) -> Result<Self> { Self::new(value) }
}

impl From<Rating> for u8 {
  fn from(rating: Rating) -> Self { rating.0 }
}

/// Response of the like endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
  /// Updated like counter
  pub likes: u64,
}

/// Response of the download endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadCount {
  /// Updated download counter
  pub downloads: u64,
}

/// Aggregate rating as computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
  /// Average of all ratings
  pub average_rating: f64,
  /// Number of ratings
  pub total_ratings:  u64,
  /// The requesting user's own rating, when the backend reports it
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_rating:    Option<u8>,
}

/// Response of the liked/downloaded id endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIds {
  /// The ids; a missing field means none
  #[serde(default)]
  pub resource_ids: Vec<String>,
}
