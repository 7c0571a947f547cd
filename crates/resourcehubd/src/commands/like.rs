//! Module for liking resources.

use super::*;

/// Options of [`Commands::Like`]
#[derive(Args, Clone)]
pub struct LikeOptions {
  /// Id of the resource
  pub id: String,
}

/// Function for the [`Commands::Like`] in the CLI.
///
/// Liking twice removes the like again.
pub async fn like<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  like_options: LikeOptions,
) -> Result<()> {
  let LikeOptions { id } = like_options;

  hub.toggle_like(&id).await?;
  let name = display_name(hub, &id);
  let likes = hub.get_by_id(&id).map_or(0, |r| r.likes);
  let message = if hub.is_liked(&id) {
    format!("Liked {name} ({likes} likes)")
  } else {
    format!("Removed your like from {name} ({likes} likes)")
  };
  interaction.reply(ResponseContent::Success(&message))
}
