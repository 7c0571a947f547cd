//! Module for writing a resourcehub configuration file.

use resourcehub::client::HttpClient;

use super::*;

/// Options of [`Commands::Init`]
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Backend base URL, e.g. `https://hub.example/api`
  #[arg(long)]
  pub api_base_url: Option<String>,

  /// Where to keep the local cache database
  #[arg(long)]
  pub cache_path: Option<PathBuf>,
}

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  init_options: InitOptions,
) -> Result<()> {
  let InitOptions { api_base_url, cache_path } = init_options;

  if config_path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, overwrite it?",
      config_path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info("Left the existing configuration in place"))?;
    return Ok(());
  }

  let api_base_url = match api_base_url {
    Some(url) => url,
    None if interaction
      .confirm(&format!("Use the default backend {}?", Config::DEFAULT_API_BASE_URL))? =>
      Config::DEFAULT_API_BASE_URL.to_string(),
    None => interaction.prompt("Backend base URL")?,
  };
  // fail early on URLs the client could not use
  HttpClient::new(&api_base_url)?;

  let mut config = Config::default().with_api_base_url(api_base_url);
  if let Some(cache_path) = cache_path {
    config = config.with_cache_path(cache_path);
  }
  config.save(config_path)?;

  interaction.reply(ResponseContent::Success(&format!(
    "Created configuration at {}\nBackend: {}\nCache: {}",
    config_path.display(),
    config.api_base_url,
    config.cache_path.display(),
  )))
}
