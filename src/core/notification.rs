use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a notification
///
/// Ids are opaque strings. Freshly generated ones are decimal millisecond
/// timestamps, but persisted data may carry any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id when it is a generated one
    pub fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of event a notification describes
///
/// Unknown tags are kept as `Other` so data written by a newer client
/// survives a round-trip through an older one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationType {
    TicketCreated,
    BookingConfirmed,
    #[default]
    General,
    Other(String),
}

impl NotificationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::TicketCreated => "ticket_created",
            Self::BookingConfirmed => "booking_confirmed",
            Self::General => "general",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for NotificationType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "ticket_created" => Self::TicketCreated,
            "booking_confirmed" => Self::BookingConfirmed,
            "general" => Self::General,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for NotificationType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<NotificationType> for String {
    fn from(kind: NotificationType) -> Self {
        match kind {
            NotificationType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Notification {
    pub const fn is_unread(&self) -> bool {
        !self.read
    }
}

/// A notification before the store has assigned `id`, `timestamp` and `read`
///
/// This is the shape the push transport hands to the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl NewNotification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: NotificationType) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Stamp the generated fields on, producing a stored record
    pub(crate) fn into_notification(
        self,
        id: NotificationId,
        timestamp: DateTime<Utc>,
    ) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            timestamp,
            read: false,
            kind: self.kind,
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_type_tags() {
        assert_eq!(
            NotificationType::from("ticket_created"),
            NotificationType::TicketCreated
        );
        assert_eq!(
            NotificationType::from("booking_confirmed"),
            NotificationType::BookingConfirmed
        );
        assert_eq!(NotificationType::from("general"), NotificationType::General);
        assert_eq!(
            NotificationType::from("trip_delayed"),
            NotificationType::Other("trip_delayed".to_string())
        );
        assert_eq!(NotificationType::TicketCreated.to_string(), "ticket_created");
    }

    #[test]
    fn test_unknown_type_survives_serialization() {
        let raw = json!({
            "id": "1700000000000",
            "title": "Delay",
            "message": "Bus 12 is late",
            "timestamp": "2024-03-01T10:00:00.123456Z",
            "read": false,
            "type": "trip_delayed"
        });

        let notification: Notification = serde_json::from_value(raw).unwrap();
        assert_eq!(
            notification.kind,
            NotificationType::Other("trip_delayed".to_string())
        );
        assert!(notification.data.is_none());

        let back = serde_json::to_value(&notification).unwrap();
        assert_eq!(back["type"], "trip_delayed");
        assert!(back.get("data").is_none());
    }

    #[test]
    fn test_missing_read_defaults_to_unread() {
        let raw = json!({
            "id": "abc",
            "title": "T",
            "message": "M",
            "timestamp": "2024-03-01T10:00:00Z",
            "type": "general"
        });

        let notification: Notification = serde_json::from_value(raw).unwrap();
        assert!(notification.is_unread());
        assert_eq!(notification.id.as_str(), "abc");
        assert_eq!(notification.id.as_millis(), None);
    }

    #[test]
    fn test_into_notification_starts_unread() {
        let now = Utc::now();
        let record = NewNotification::new("T", "M", NotificationType::General)
            .with_data(json!({"ticketId": "X"}))
            .into_notification(NotificationId::new("7"), now);

        assert_eq!(record.id.as_millis(), Some(7));
        assert_eq!(record.timestamp, now);
        assert!(!record.read);
        assert_eq!(record.data, Some(json!({"ticketId": "X"})));
    }
}
