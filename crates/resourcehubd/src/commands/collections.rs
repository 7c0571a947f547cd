//! Module for managing collections.

use super::*;

/// Operations on the signed-in user's collections
#[derive(Subcommand, Clone)]
pub enum CollectionCommands {
  /// List your collections
  List,

  /// Create a new collection
  Create {
    /// Name of the collection
    name:        String,
    /// Optional description
    #[arg(long, short)]
    description: Option<String>,
  },

  /// Add a resource to a collection
  Add {
    /// Id of the collection
    collection_id: String,
    /// Id of the resource
    resource_id:   String,
  },

  /// Remove a resource from a collection
  Remove {
    /// Id of the collection
    collection_id: String,
    /// Id of the resource
    resource_id:   String,
  },

  /// Show the resources in a collection
  Show {
    /// Id of the collection
    collection_id: String,
  },
}

/// Loads the user's collections and returns the name of `collection_id`.
async fn collection_name(hub: &Hub, collection_id: &str) -> Result<String> {
  hub
    .load_collections()
    .await?
    .into_iter()
    .find(|c| c.id == collection_id)
    .map(|c| c.name)
    .ok_or_else(|| ResourcehubdError::NotFound(format!("Collection {collection_id}")))
}

/// Function for the [`Commands::Collections`] in the CLI.
pub async fn collections<I: UserInteraction>(
  interaction: &I,
  hub: &Hub,
  cmd: CollectionCommands,
) -> Result<()> {
  match cmd {
    CollectionCommands::List => {
      let collections = hub.load_collections().await?;
      interaction.reply(ResponseContent::Collections(&collections))
    },
    CollectionCommands::Create { name, description } => {
      let collection = hub.create_collection(&name, description.as_deref()).await?;
      interaction.reply(ResponseContent::Success(&format!(
        "Created collection {} ({})",
        collection.name, collection.id
      )))
    },
    CollectionCommands::Add { collection_id, resource_id } => {
      let name = collection_name(hub, &collection_id).await?;
      hub.get_all().await;
      hub.add_to_collection(&collection_id, &resource_id).await?;
      interaction.reply(ResponseContent::Success(&format!(
        "Added {} to {name}",
        display_name(hub, &resource_id)
      )))
    },
    CollectionCommands::Remove { collection_id, resource_id } => {
      let name = collection_name(hub, &collection_id).await?;
      hub.get_all().await;
      let resource = display_name(hub, &resource_id);
      if !interaction.confirm(&format!("Remove {resource} from {name}?"))? {
        return interaction.reply(ResponseContent::Info("Nothing removed"));
      }
      hub.remove_from_collection(&collection_id, &resource_id).await?;
      interaction.reply(ResponseContent::Success(&format!("Removed {resource} from {name}")))
    },
    CollectionCommands::Show { collection_id } => {
      let name = collection_name(hub, &collection_id).await?;
      let resources = hub.collection_resources(&collection_id).await?;
      interaction.reply(ResponseContent::Info(&name))?;
      interaction.reply(ResponseContent::Resources(&resources))
    },
  }
}
