use crate::alert::TerminalAlerter;
use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::Result;
use crate::storage::FileBlobStore;
use crate::store::NotificationStore;
use std::path::{Path, PathBuf};

/// Common context for all handler operations
///
/// Building the context is the application start-up: configuration is
/// resolved, the store is constructed over the data directory and the
/// persisted notifications are loaded.
pub struct HandlerContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: NotificationStore,
    pub formatter: OutputFormatter,
}

impl HandlerContext {
    /// Create a new handler context
    pub fn new(
        data_dir: Option<&str>,
        config_file: Option<&str>,
        formatter: OutputFormatter,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Config::load(Some(Path::new(path)))?,
            None => Config::load_or_default(data_dir.map(Path::new))?,
        };
        if let Some(dir) = data_dir {
            config.storage.data_dir = Some(PathBuf::from(dir));
        }

        let data_dir = config.data_dir();
        let mut store = NotificationStore::new(FileBlobStore::new(&data_dir))
            .with_alerter(TerminalAlerter::new(config.alerts.enabled))
            .with_storage_key(config.storage.key.clone());
        store.load_notifications();

        tracing::debug!(
            "Opened store at {} with {} notifications",
            data_dir.display(),
            store.len()
        );

        Ok(Self {
            config,
            data_dir,
            store,
            formatter,
        })
    }

    /// Display formatted success message
    pub fn success(&self, message: &str) {
        self.formatter.success(message);
    }

    /// Display formatted info message
    pub fn info(&self, message: &str) {
        self.formatter.info(message);
    }

    /// Display formatted warning message
    pub fn warning(&self, message: &str) {
        self.formatter.warning(message);
    }
}

/// Argument parsing shared by the handlers
pub mod parsing {
    use crate::error::{NotifierError, Result};

    /// Validate a notification title
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(NotifierError::InvalidInput(
                "Notification title cannot be empty".to_string(),
            ));
        }
        if title.chars().count() > 200 {
            return Err(NotifierError::InvalidInput(
                "Notification title cannot exceed 200 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse the `--data` JSON payload
    pub fn parse_data(data: Option<&str>) -> Result<Option<serde_json::Value>> {
        data.map(|raw| {
            serde_json::from_str(raw)
                .map_err(|e| NotifierError::InvalidInput(format!("--data is not valid JSON: {e}")))
        })
        .transpose()
    }
}
