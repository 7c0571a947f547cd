//! Layered configuration.
//!
//! Values are resolved in order, later layers winning:
//! 1. Built-in defaults
//! 2. A TOML file (by default `<config dir>/resourcehub/config.toml`, optional)
//! 3. `RESOURCEHUB_*` environment variables, e.g. `RESOURCEHUB_API_BASE_URL`
//!
//! ```toml
//! api_base_url = "https://api.resourcehub.example/api"
//! cache_path = "/home/ada/.local/share/resourcehub/cache.db"
//! stale_after_secs = 300
//! ```

use super::*;

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "RESOURCEHUB";

/// Runtime configuration of a [`Hub`](crate::Hub).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Base URL every endpoint path is appended to
  pub api_base_url:     String,
  /// SQLite file backing the local cache store
  pub cache_path:       PathBuf,
  /// How long a fetched resource list is served without refetching
  pub stale_after_secs: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_base_url:     Self::DEFAULT_API_BASE_URL.to_string(),
      cache_path:       Self::default_cache_path(),
      stale_after_secs: 5 * 60,
    }
  }
}

impl Config {
  /// Backend used when nothing else is configured.
  pub const DEFAULT_API_BASE_URL: &'static str = "http://localhost:3001/api";

  /// Default location of the configuration file.
  ///
  /// - On Unix: `~/.config/resourcehub/config.toml`
  /// - On macOS: `~/Library/Application Support/resourcehub/config.toml`
  /// - On Windows: `%APPDATA%\resourcehub\config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("resourcehub").join("config.toml")
  }

  /// Default location of the local cache database.
  pub fn default_cache_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("resourcehub").join("cache.db")
  }

  /// Resolves the configuration from defaults, the file at `path` (or
  /// [`Config::default_path`]) and the environment.
  ///
  /// A missing file is not an error.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let defaults = Self::default();
    let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
    debug!("Loading configuration from {}", path.display());

    let settings = config::Config::builder()
      .set_default("api_base_url", defaults.api_base_url)?
      .set_default("cache_path", defaults.cache_path.to_string_lossy().into_owned())?
      .set_default("stale_after_secs", 300_i64)?
      .add_source(
        config::File::new(&path.to_string_lossy(), config::FileFormat::Toml).required(false),
      )
      .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .build()?;

    Ok(settings.try_deserialize()?)
  }

  /// Writes the configuration as TOML, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Sets the backend base URL.
  pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
    self.api_base_url = url.into();
    self
  }

  /// Sets the cache database path.
  pub fn with_cache_path(mut self, path: impl AsRef<Path>) -> Self {
    self.cache_path = path.as_ref().to_path_buf();
    self
  }

  /// Sets the staleness window of the resource list.
  pub fn with_stale_after(mut self, window: Duration) -> Self {
    self.stale_after_secs = window.as_secs();
    self
  }

  /// The staleness window of the resource list.
  pub fn stale_after(&self) -> Duration { Duration::from_secs(self.stale_after_secs) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api_base_url, "http://localhost:3001/api");
    assert_eq!(config.stale_after(), Duration::from_secs(300));
    assert!(config.cache_path.ends_with("resourcehub/cache.db"));
  }

  #[test]
  fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config.stale_after_secs, 300);
  }

  #[traced_test]
  #[test]
  fn test_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_base_url = \"https://hub.example/api\"\nstale_after_secs = 30\n")
      .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.api_base_url, "https://hub.example/api");
    assert_eq!(config.stale_after_secs, 30);
    assert!(logs_contain("Loading configuration"));
  }

  #[test]
  fn test_save_writes_loadable_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config::default()
      .with_api_base_url("http://127.0.0.1:9/api")
      .with_cache_path(dir.path().join("cache.db"))
      .with_stale_after(Duration::from_secs(60));

    config.save(&path).unwrap();
    assert_eq!(Config::load(Some(&path)).unwrap(), config);
  }
}
