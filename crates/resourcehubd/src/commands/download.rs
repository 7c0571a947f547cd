//! Module for recording downloads.

use super::*;

/// Options of [`Commands::Download`]
#[derive(Args, Clone)]
pub struct DownloadOptions {
  /// Id of the resource
  pub id: String,
}

/// Function for the [`Commands::Download`] in the CLI.
pub async fn download<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  download_options: DownloadOptions,
) -> Result<()> {
  let DownloadOptions { id } = download_options;

  hub.add_download(&id).await?;
  let downloads = hub.get_by_id(&id).map_or(0, |r| r.downloads);
  interaction.reply(ResponseContent::Success(&format!(
    "Recorded download of {} ({downloads} downloads)",
    display_name(hub, &id)
  )))
}
