use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::wishlist::WISHLIST_STORAGE_KEY;

pub const DEFAULT_API_BASE_URL: &str = "https://gutendex.com/books";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML config file structure. Every field is optional; missing fields take
/// the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigYaml {
    pub api_base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub wishlist_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    /// Where the storage file lives
    pub data_dir: PathBuf,
    /// Storage key for the wishlist payload
    pub wishlist_key: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            wishlist_key: WISHLIST_STORAGE_KEY.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

impl Config {
    /// Dev mode (`FOLIO_DEV_MODE` or a `.env` file) reads `FOLIO_*` variables;
    /// otherwise the YAML file in the platform config dir is used, if any.
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = std::env::var("FOLIO_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from environment");
            return Self::from_env();
        }
        match Self::config_path() {
            Some(path) => Self::from_config_file(&path),
            None => {
                info!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.yaml"))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `FOLIO_*` variables resolved through `lookup`. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let request_timeout_secs = match get("FOLIO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
                ConfigError::Config(format!("FOLIO_REQUEST_TIMEOUT_SECS={raw}: {e}"))
            })?),
            None => None,
        };

        Self::from_yaml(ConfigYaml {
            api_base_url: get("FOLIO_API_BASE_URL"),
            data_dir: get("FOLIO_DATA_DIR").map(PathBuf::from),
            wishlist_key: get("FOLIO_WISHLIST_KEY"),
            request_timeout_secs,
            user_agent: get("FOLIO_USER_AGENT"),
        })
    }

    /// A missing file means defaults; an unparsable one is an error.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        info!("Loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let yaml: ConfigYaml = serde_yaml::from_str(&raw)
            .map_err(|e| ConfigError::Serialization(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(yaml)
    }

    fn from_yaml(yaml: ConfigYaml) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            api_base_url: yaml.api_base_url.unwrap_or(defaults.api_base_url),
            data_dir: yaml.data_dir.unwrap_or(defaults.data_dir),
            wishlist_key: yaml.wishlist_key.unwrap_or(defaults.wishlist_key),
            request_timeout_secs: yaml
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            user_agent: yaml.user_agent.unwrap_or(defaults.user_agent),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Config(format!(
                "api_base_url must be an http(s) URL, got {}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// File backing the key-value store.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    pub fn save_to_config_yaml(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = ConfigYaml {
            api_base_url: Some(self.api_base_url.clone()),
            data_dir: Some(self.data_dir.clone()),
            wishlist_key: Some(self.wishlist_key.clone()),
            request_timeout_secs: Some(self.request_timeout_secs),
            user_agent: Some(self.user_agent.clone()),
        };
        let raw =
            serde_yaml::to_string(&yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
