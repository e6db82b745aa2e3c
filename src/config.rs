//! Configuration
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `BUS_NOTIFIER__SECTION__KEY` environment variables.

use crate::error::Result;
use crate::store::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "BUS_NOTIFIER";

/// Base name of the config file looked up in the data directory
pub const CONFIG_FILE_NAME: &str = "bus-notifier";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub alerts: AlertConfig,
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; the platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Whether a permission request is granted
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Logged-in user, used for the per-user topic
    pub user_id: Option<String>,
    pub user_topic_prefix: String,
    pub general_topic: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            user_topic_prefix: "user_".to_string(),
            general_topic: "general".to_string(),
        }
    }
}

impl TransportConfig {
    /// Topic carrying notifications for `user_id`
    pub fn user_topic(&self, user_id: &str) -> String {
        format!("{}{}", self.user_topic_prefix, user_id)
    }
}

impl Config {
    /// Load configuration from `file` (if any) and the process environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, None)
    }

    /// Load configuration, reading overrides from `env` instead of the
    /// process environment when given
    pub fn load_with_env(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let config: Self = builder.add_source(environment).build()?.try_deserialize()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load from the default config file in `data_dir` when present
    pub fn load_or_default(data_dir: Option<&Path>) -> Result<Self> {
        let dir = data_dir.map_or_else(default_data_dir, Path::to_path_buf);
        let file = ["toml", "yaml", "json"]
            .iter()
            .map(|ext| dir.join(format!("{CONFIG_FILE_NAME}.{ext}")))
            .find(|path| path.exists());

        Self::load(file.as_deref())
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
    }
}

/// Platform data directory, or `.bus-notifier` when none is known
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "busticket", "bus-notifier")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".bus-notifier"))
}
