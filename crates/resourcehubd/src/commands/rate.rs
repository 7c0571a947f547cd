//! Module for rating resources.

use super::*;

/// Options of [`Commands::Rate`]
#[derive(Args, Clone)]
pub struct RateOptions {
  /// Id of the resource
  pub id: String,

  /// Stars from 1 to 5; leave out to show the current rating
  pub stars: Option<u8>,
}

/// Function for the [`Commands::Rate`] in the CLI.
pub async fn rate<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  rate_options: RateOptions,
) -> Result<()> {
  let RateOptions { id, stars } = rate_options;

  let rating = stars.map(Rating::new).transpose()?;

  hub.get_all().await;
  let summary = match rating {
    Some(rating) => hub.rate_resource(&id, rating).await?,
    None => hub.load_ratings(&id).await?,
  };

  let mut message = format!(
    "{}: {:.1} stars from {} ratings",
    display_name(hub, &id),
    summary.average_rating,
    summary.total_ratings
  );
  if let Some(own) = summary.user_rating.or_else(|| hub.user_rating(&id).map(u8::from)) {
    message.push_str(&format!(", you gave {own}"));
  }

  if rating.is_some() {
    interaction.reply(ResponseContent::Success(&message))
  } else {
    interaction.reply(ResponseContent::Info(&message))
  }
}
