//! Core notification types

mod builders;
mod notification;

pub use builders::NewNotificationBuilder;
pub use notification::{NewNotification, Notification, NotificationId, NotificationType};
