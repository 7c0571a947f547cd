//! Module for reading notifications.

use super::*;

/// Operations on the signed-in user's notifications
#[derive(Subcommand, Clone)]
pub enum NotificationCommands {
  /// List your notifications
  List,

  /// Mark one notification as read
  Read {
    /// Id of the notification
    id: String,
  },

  /// Mark every notification as read
  ReadAll,

  /// Delete a notification
  Delete {
    /// Id of the notification
    id: String,
  },
}

/// Function for the [`Commands::Notifications`] in the CLI.
pub async fn notifications<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  cmd: NotificationCommands,
) -> Result<()> {
  let notifications = hub.load_notifications().await?;

  match cmd {
    NotificationCommands::List => {
      interaction.reply(ResponseContent::Notifications(&notifications))?;
      let unread = hub.unread_notifications_count();
      if unread > 0 {
        interaction.reply(ResponseContent::Info(&format!("{unread} unread")))?;
      }
      Ok(())
    },
    NotificationCommands::Read { id } => {
      if !notifications.iter().any(|n| n.id == id) {
        return Err(ResourcehubdError::NotFound(format!("Notification {id}")));
      }
      hub.mark_notification_as_read(&id).await?;
      interaction.reply(ResponseContent::Success(&format!(
        "Marked {id} as read, {} unread left",
        hub.unread_notifications_count()
      )))
    },
    NotificationCommands::ReadAll => {
      hub.mark_all_notifications_as_read().await?;
      interaction.reply(ResponseContent::Success("All notifications marked as read"))
    },
    NotificationCommands::Delete { id } => {
      let Some(notification) = notifications.iter().find(|n| n.id == id) else {
        return Err(ResourcehubdError::NotFound(format!("Notification {id}")));
      };
      if !interaction.confirm(&format!("Delete \"{}\"?", notification.title))? {
        return interaction.reply(ResponseContent::Info("Nothing deleted"));
      }
      hub.delete_notification(&id).await?;
      interaction.reply(ResponseContent::Success(&format!("Deleted notification {id}")))
    },
  }
}
