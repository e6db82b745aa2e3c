use super::{NewNotification, NotificationType};
use serde_json::{Map, Value};

/// Builder for creating `NewNotification` instances
///
/// Data entries added with [`data_field`](Self::data_field) are collected into
/// a JSON object; [`data`](Self::data) replaces the payload wholesale.
#[derive(Default)]
pub struct NewNotificationBuilder {
    title: Option<String>,
    message: Option<String>,
    kind: Option<NotificationType>,
    data: Option<Value>,
    fields: Map<String, Value>,
}

impl NewNotificationBuilder {
    /// Create a new notification builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the message body
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the notification type
    #[must_use]
    pub fn kind(mut self, kind: impl Into<NotificationType>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the whole data payload
    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a single data field
    #[must_use]
    pub fn data_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Build the notification
    pub fn build(self) -> NewNotification {
        let data = match (self.data, self.fields.is_empty()) {
            (Some(Value::Object(mut base)), false) => {
                base.extend(self.fields);
                Some(Value::Object(base))
            },
            (Some(data), _) => Some(data),
            (None, false) => Some(Value::Object(self.fields)),
            (None, true) => None,
        };

        NewNotification {
            title: self.title.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            data,
        }
    }
}
