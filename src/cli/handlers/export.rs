use super::common::HandlerContext;
use crate::core::Notification;
use crate::error::{NotifierError, Result};
use std::fs;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(NotifierError::InvalidInput(format!(
                "Unsupported export format: {format}. Must be one of: json, yaml"
            ))),
        }
    }

    pub fn render(self, notifications: &[Notification]) -> Result<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(notifications)?,
            Self::Yaml => serde_yaml::to_string(notifications)?,
        })
    }
}

/// Handle the export command
pub fn handle_export_command(format: &str, output: Option<&str>, ctx: &HandlerContext) -> Result<()> {
    let format = ExportFormat::parse(format)?;
    let notifications = ctx.store.get_notifications();
    let content = format.render(&notifications)?;

    match output {
        Some(path) => {
            fs::write(path, &content)?;
            ctx.success(&format!(
                "✅ Exported {} notifications to {path}",
                notifications.len()
            ));
        },
        None => println!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewNotification, NotificationType};
    use crate::store::NotificationStore;
    use crate::storage::MemoryBlobStore;

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::parse("JSON").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::parse("yml").unwrap(), ExportFormat::Yaml);
        assert!(ExportFormat::parse("csv").is_err());
    }

    #[test]
    fn test_render_formats() {
        let mut store = NotificationStore::new(MemoryBlobStore::new());
        store.add_notification(NewNotification::new(
            "Booking confirmed",
            "Coach 5, 08:30",
            NotificationType::BookingConfirmed,
        ));
        let notifications = store.get_notifications();

        let json = ExportFormat::Json.render(&notifications).unwrap();
        let parsed: Vec<Notification> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, notifications);

        let yaml = ExportFormat::Yaml.render(&notifications).unwrap();
        assert!(yaml.contains("type: booking_confirmed"));
        assert!(yaml.contains("title: Booking confirmed"));
    }
}
