use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Remote recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where persisted state (likes) lives
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the remote recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the `search` and `get` endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Configuration for durable storage
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key.
    /// Falls back to the platform data directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the storage directory, using `<data dir>/forkify` when none is configured
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        self.dir.clone().or_else(|| {
            dirs::data_dir()
                .or_else(dirs::home_dir)
                .map(|base| base.join("forkify"))
        })
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("forkify/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    /// Load configuration from `forkify.toml` and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKIFY__ prefix
    /// 2. forkify.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKIFY__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }

    /// Load configuration from an explicit file instead of `forkify.toml`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        load_config(Some(path))
    }
}

/// Load configuration from an optional file and environment variables
///
/// An explicitly named file must exist; the default `forkify.toml` may be missing.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("forkify").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: FORKIFY__STORAGE__DIR
        .add_source(
            Environment::with_prefix("FORKIFY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
