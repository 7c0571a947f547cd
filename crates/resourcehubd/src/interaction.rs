//! How commands talk to the person at the terminal.
//!
//! Commands never print directly. They hand a [`ResponseContent`] to a
//! [`UserInteraction`], which decides how it looks, and ask it for confirmations.

use console::style;
use dialoguer::{Confirm, Input};
use resourcehub::{
  resource::{Collection, Notification, Resource},
  thread::CommentThread,
};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix of a list item
pub static ITEM_PREFIX: &str = "├─";
/// Prefix of the last list item
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line under a list item
pub static CONTINUE_PREFIX: &str = "│  ";
/// Marks unread notifications
pub static BULLET: &str = "•";

/// Something a command wants shown.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// One resource in detail
  Resource(&'a Resource),
  /// A list of resources
  Resources(&'a [Resource]),
  /// A list of collections
  Collections(&'a [Collection]),
  /// Comment threads of one resource
  Threads(&'a [CommentThread]),
  /// A list of notifications
  Notifications(&'a [Notification]),
  /// Something worked
  Success(&'a str),
  /// Neutral information
  Info(&'a str),
}

/// Input and output of a command.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for a line of text.
  fn prompt(&self, message: &str) -> Result<String>;
  /// Shows `content`.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// [`UserInteraction`] on stdout/stdin.
pub struct Terminal {
  /// Answer every question with its default instead of asking
  pub accept_defaults: bool,
}

impl Terminal {
  /// One-line summary of a resource.
  fn resource_line(resource: &Resource) -> String {
    format!(
      "{} {} {} {}",
      style(&resource.id).dim(),
      style(&resource.title).white().bold(),
      style(format!("[{} · {}]", resource.category, resource.license)).cyan(),
      style(format!("♥ {} ⬇ {}", resource.likes, resource.downloads)).yellow(),
    )
  }

  /// Prints `lines` as a tree.
  fn print_items(lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
      let prefix = if i + 1 == lines.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
      println!("{} {line}", style(prefix).dim());
    }
  }

  /// Prints a titled field of a detailed view.
  fn print_field(name: &str, value: impl Display) {
    println!("{} {}: {value}", style(CONTINUE_PREFIX).dim(), style(name).dim());
  }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).yellow()))
        .default(false)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str) -> Result<String> {
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).yellow()))
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Resource(resource) => {
        println!("{}{}", style(INFO_PREFIX).blue(), style(&resource.title).white().bold());
        Self::print_field("Id", &resource.id);
        Self::print_field("Description", &resource.description);
        Self::print_field("Category", &resource.category);
        Self::print_field("License", resource.license);
        Self::print_field("Author", &resource.author);
        Self::print_field("Added", &resource.date_added);
        if let Some(format) = &resource.format {
          Self::print_field("Format", format);
        }
        if let Some(size) = &resource.file_size {
          Self::print_field("Size", size);
        }
        if !resource.tags.is_empty() {
          Self::print_field("Tags", resource.tags.join(", "));
        }
        Self::print_field("Likes", resource.likes);
        Self::print_field("Downloads", resource.downloads);
        if let (Some(average), Some(total)) = (resource.average_rating, resource.total_ratings) {
          Self::print_field("Rating", format!("{average:.1} ({total} ratings)"));
        }
      },
      ResponseContent::Resources(resources) => {
        if resources.is_empty() {
          println!("{}No resources found", style(INFO_PREFIX).blue());
        } else {
          println!("{}Found {} resources", style(SUCCESS_PREFIX).green(), resources.len());
          let lines: Vec<_> = resources.iter().map(Self::resource_line).collect();
          Self::print_items(&lines);
        }
      },
      ResponseContent::Collections(collections) => {
        if collections.is_empty() {
          println!("{}No collections yet", style(INFO_PREFIX).blue());
        } else {
          let lines: Vec<_> = collections
            .iter()
            .map(|c| {
              format!(
                "{} {} {}",
                style(&c.id).dim(),
                style(&c.name).white().bold(),
                style(format!("({} resources)", c.resource_ids.len())).cyan(),
              )
            })
            .collect();
          Self::print_items(&lines);
        }
      },
      ResponseContent::Threads(threads) => {
        if threads.is_empty() {
          println!("{}No comments yet", style(INFO_PREFIX).blue());
        }
        for thread in threads {
          let comment = &thread.comment;
          println!(
            "{} {} {}: {} {}",
            style(ITEM_PREFIX).dim(),
            style(&comment.id).dim(),
            style(&comment.author).white().bold(),
            comment.content,
            style(format!("♥ {}", comment.likes)).yellow(),
          );
          for reply in &thread.replies {
            println!(
              "{}{} {} {}: {} {}",
              style(CONTINUE_PREFIX).dim(),
              style(LAST_ITEM_PREFIX).dim(),
              style(&reply.id).dim(),
              style(&reply.author).white().bold(),
              reply.content,
              style(format!("♥ {}", reply.likes)).yellow(),
            );
          }
        }
      },
      ResponseContent::Notifications(notifications) => {
        if notifications.is_empty() {
          println!("{}No notifications", style(INFO_PREFIX).blue());
        } else {
          let lines: Vec<_> = notifications
            .iter()
            .map(|n| {
              let marker = if n.read { " " } else { BULLET };
              format!(
                "{} {} {} {}: {}",
                style(marker).yellow(),
                style(&n.id).dim(),
                style(n.kind).cyan(),
                style(&n.title).white().bold(),
                n.message,
              )
            })
            .collect();
          Self::print_items(&lines);
        }
      },
      ResponseContent::Success(message) => println!("{}{message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{}{message}", style(INFO_PREFIX).blue()),
    }
    Ok(())
  }
}
