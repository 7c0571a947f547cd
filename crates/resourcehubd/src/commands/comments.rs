//! Module for reading and writing comments.

use super::*;

/// Operations on comments
#[derive(Subcommand, Clone)]
pub enum CommentCommands {
  /// Show the comment threads of a resource
  List {
    /// Id of the resource
    resource_id: String,
  },

  /// Comment on a resource, or reply to a top-level comment
  Add {
    /// Id of the resource
    resource_id: String,
    /// Text of the comment
    content:     String,
    /// Id of the top-level comment to reply to
    #[arg(long)]
    reply_to:    Option<String>,
  },

  /// Change the text of a comment
  Edit {
    /// Id of the comment
    comment_id: String,
    /// New text
    content:    String,
  },

  /// Delete a comment
  Delete {
    /// Id of the comment
    comment_id: String,
  },

  /// Like a comment
  Like {
    /// Id of the comment
    comment_id: String,
  },
}

/// Function for the [`Commands::Comments`] in the CLI.
pub async fn comments<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  cmd: CommentCommands,
) -> Result<()> {
  match cmd {
    CommentCommands::List { resource_id } => {
      hub.load_comments(&resource_id).await?;
      interaction.reply(ResponseContent::Threads(&hub.comment_threads(&resource_id)))
    },
    CommentCommands::Add { resource_id, content, reply_to } => {
      // replies are checked against the loaded comments
      if reply_to.is_some() {
        hub.load_comments(&resource_id).await?;
      }
      let comment = hub.add_comment(&resource_id, &content, reply_to.as_deref()).await?;
      let what = if comment.parent_id.is_some() { "reply" } else { "comment" };
      interaction.reply(ResponseContent::Success(&format!("Posted {what} {}", comment.id)))
    },
    CommentCommands::Edit { comment_id, content } => {
      let comment = hub.update_comment(&comment_id, &content).await?;
      interaction.reply(ResponseContent::Success(&format!("Updated comment {}", comment.id)))
    },
    CommentCommands::Delete { comment_id } => {
      if hub.current_user().is_none() {
        return Err(HubError::Unauthenticated.into());
      }
      if !interaction.confirm(&format!("Delete comment {comment_id}?"))? {
        return interaction.reply(ResponseContent::Info("Nothing deleted"));
      }
      hub.delete_comment(&comment_id).await?;
      interaction.reply(ResponseContent::Success(&format!("Deleted comment {comment_id}")))
    },
    CommentCommands::Like { comment_id } => {
      let likes = hub.like_comment(&comment_id).await?;
      interaction
        .reply(ResponseContent::Success(&format!("Liked comment {comment_id} ({likes} likes)")))
    },
  }
}
