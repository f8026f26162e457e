use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Viewer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    /// Base URL the static collection is served from
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Index document path, relative to the base URL
    #[serde(default = "default_index_path")]
    pub index_path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_path: default_index_path(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_index_path() -> String {
    crate::index::INDEX_PATH.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ViewerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPEBOOK__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPEBOOK__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPEBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
