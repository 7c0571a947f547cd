//! Module for showing a single resource.

use super::*;

/// Options of [`Commands::Get`]
#[derive(Args, Clone)]
pub struct GetOptions {
  /// Id of the resource
  pub id: String,

  /// Also show the comment threads
  #[arg(long)]
  pub comments: bool,
}

/// Function for the [`Commands::Get`] in the CLI.
pub async fn get<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  get_options: GetOptions,
) -> Result<()> {
  let GetOptions { id, comments } = get_options;

  hub.get_all().await;
  let resource =
    hub.get_by_id(&id).ok_or_else(|| ResourcehubdError::NotFound(format!("Resource {id}")))?;
  interaction.reply(ResponseContent::Resource(&resource))?;

  if hub.current_user().is_some() {
    if let Err(e) = hub.load_collections().await {
      debug!("Could not load collections: {e}");
    }
    let mut marks = Vec::new();
    if hub.is_liked(&id) {
      marks.push("liked");
    }
    if hub.is_downloaded(&id) {
      marks.push("downloaded");
    }
    if hub.is_resource_in_collection(&id) {
      marks.push("collected");
    }
    if !marks.is_empty() {
      interaction.reply(ResponseContent::Info(&format!("You have {} this", marks.join(", "))))?;
    }
  }

  if comments {
    hub.load_comments(&id).await?;
    interaction.reply(ResponseContent::Threads(&hub.comment_threads(&id)))?;
  }
  Ok(())
}
