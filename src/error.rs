//! Error types for bus-notifier
//!
//! The store itself never surfaces these to its callers: persistence, alert and
//! transport failures are absorbed and logged. They show up at the adapter
//! seams (`BlobStore`, `Alerter`, `PushTransport`) and in the CLI.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NotifierError>;

/// Errors produced by bus-notifier components
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML encode failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration could not be read or merged
    #[error("Failed to read config: {0}")]
    Config(#[from] config::ConfigError),

    /// No notification with the given id
    #[error("Notification not found: {id}")]
    NotificationNotFound { id: String },

    /// User supplied a malformed value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Blob store refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Push transport failed to start or subscribe
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local alert could not be requested or shown
    #[error("Alert error: {0}")]
    Alert(String),

    #[error("{0}")]
    Custom(String),
}

impl NotifierError {
    /// Create a custom error from any displayable message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Message shown to the user by the CLI
    pub fn user_message(&self) -> String {
        match self {
            Self::NotificationNotFound { id } => {
                format!("No notification with id '{id}'")
            },
            Self::Config(e) => format!("Failed to read config: {e}"),
            _ => self.to_string(),
        }
    }

    /// Hints for fixing the error, if any
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotificationNotFound { .. } => vec![
                "Run 'bus-notifier list' to see the available ids".to_string(),
            ],
            Self::Config(_) => vec![
                "Check the config file syntax".to_string(),
                "Environment overrides use the BUS_NOTIFIER__SECTION__KEY form".to_string(),
            ],
            Self::Io(_) | Self::Storage(_) => vec![
                "Check that the data directory exists and is writable".to_string(),
                "Use --data-dir to point at another location".to_string(),
            ],
            Self::InvalidInput(_) => {
                vec!["Run the command with --help to see the expected format".to_string()]
            },
            _ => vec![],
        }
    }

    /// Whether the process can keep going after this error
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Io(_))
    }

    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_has_suggestion() {
        let err = NotifierError::NotificationNotFound {
            id: "42".to_string(),
        };
        assert_eq!(err.user_message(), "No notification with id '42'");
        assert_eq!(err.suggestions().len(), 1);
        assert!(err.is_recoverable());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: NotifierError = io.into();
        assert!(matches!(err, NotifierError::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_custom_message() {
        let err = NotifierError::custom("boom");
        assert_eq!(err.to_string(), "boom");
        assert!(err.suggestions().is_empty());
    }
}
