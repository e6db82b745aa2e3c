//! The notification store
//!
//! `NotificationStore` is the single owner of the notification list. It is
//! constructed once by the owning application and handed to whoever needs it;
//! every mutation updates the in-memory list, persists the whole list to the
//! blob store and then notifies subscribers, in that order.
//!
//! Side effects are best-effort. A failed persist or alert is logged and the
//! in-memory list stays authoritative for the rest of the session.

mod ids;
mod subscribers;

pub use subscribers::{Listener, Subscription, SubscriptionId};

use crate::alert::{Alert, AlertPermission, Alerter, NoopAlerter};
use crate::core::{NewNotification, Notification};
use crate::storage::BlobStore;
use chrono::{Duration, Utc};
use ids::IdGenerator;
use std::collections::HashSet;
use std::sync::Arc;
use subscribers::Subscribers;

/// Key the notification list is persisted under unless overridden
pub const DEFAULT_STORAGE_KEY: &str = "bus-ticket.notifications";

pub struct NotificationStore {
    notifications: Vec<Notification>,
    blob_store: Box<dyn BlobStore>,
    alerter: Box<dyn Alerter>,
    alert_permission: AlertPermission,
    storage_key: String,
    subscribers: Subscribers,
    ids: IdGenerator,
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("notifications", &self.notifications.len())
            .field("storage_key", &self.storage_key)
            .field("subscribers", &self.subscribers.len())
            .field("alert_permission", &self.alert_permission)
            .field("blob_store", &"Box<dyn BlobStore>")
            .field("alerter", &"Box<dyn Alerter>")
            .finish()
    }
}

impl NotificationStore {
    /// Create an empty store persisting to `blob_store`
    ///
    /// Call [`load_notifications`](Self::load_notifications) to pick up what a
    /// previous session persisted.
    pub fn new(blob_store: impl BlobStore + 'static) -> Self {
        Self {
            notifications: Vec::new(),
            blob_store: Box::new(blob_store),
            alerter: Box::new(NoopAlerter),
            alert_permission: AlertPermission::Denied,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            subscribers: Subscribers::new(),
            ids: IdGenerator::new(),
        }
    }

    #[must_use]
    pub fn with_alerter(mut self, alerter: impl Alerter + 'static) -> Self {
        self.alert_permission = alerter.permission();
        self.alerter = Box::new(alerter);
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Replace the in-memory list with the persisted one
    ///
    /// A missing, unreadable or corrupt blob yields an empty list. Records
    /// repeating an earlier id are dropped. Subscribers are not notified.
    pub fn load_notifications(&mut self) -> &[Notification] {
        let mut notifications = match self.blob_store.get(&self.storage_key) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Notification>>(&blob) {
                Ok(notifications) => notifications,
                Err(e) => {
                    tracing::warn!(
                        "Discarding unreadable notifications under '{}': {}",
                        self.storage_key,
                        e
                    );
                    Vec::new()
                },
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read notifications: {}", e);
                Vec::new()
            },
        };

        let loaded = notifications.len();
        let mut seen = HashSet::new();
        notifications.retain(|n| seen.insert(n.id.clone()));
        if notifications.len() < loaded {
            tracing::warn!(
                "Dropped {} notifications with duplicate ids under '{}'",
                loaded - notifications.len(),
                self.storage_key
            );
        }

        self.notifications = notifications;
        self.ids.reseed(&self.notifications);
        tracing::debug!("Loaded {} notifications", self.notifications.len());
        &self.notifications
    }

    /// Snapshot of the list, newest first
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications.clone()
    }

    pub fn get_notification(&self, id: &str) -> Option<Notification> {
        self.notifications
            .iter()
            .find(|n| n.id.as_str() == id)
            .cloned()
    }

    pub fn get_unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_unread()).count()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Add a notification at the front of the list
    ///
    /// This is the ingestion point for the push transport as well as for
    /// local actions. Returns the stored record.
    pub fn add_notification(&mut self, new: NewNotification) -> Notification {
        let mut now = Utc::now();
        // Keep list order and chronological order in agreement
        if let Some(head) = self.notifications.first() {
            if head.timestamp >= now {
                now = head.timestamp + Duration::microseconds(1);
            }
        }

        let id = self.ids.next_id(now, &self.notifications);
        let notification = new.into_notification(id, now);
        self.notifications.insert(0, notification.clone());
        tracing::debug!(
            "Added notification {} ({})",
            notification.id,
            notification.kind
        );

        self.commit();
        self.alert(&notification);
        notification
    }

    /// Mark one notification as read
    ///
    /// Returns `false`, without persisting or notifying, when the id is
    /// unknown or the notification was already read.
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id.as_str() == id && n.is_unread())
        else {
            return false;
        };

        notification.read = true;
        self.commit();
        true
    }

    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
        self.commit();
    }

    pub fn clear_all(&mut self) {
        self.notifications.clear();
        self.commit();
    }

    /// Remove one notification
    ///
    /// Returns `false`, without persisting or notifying, when the id is
    /// unknown.
    pub fn delete_notification(&mut self, id: &str) -> bool {
        let Some(index) = self.notifications.iter().position(|n| n.id.as_str() == id) else {
            return false;
        };

        self.notifications.remove(index);
        self.commit();
        true
    }

    /// Register a callback receiving the full list after each mutation
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(Arc::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Ask the alerter for permission to show alerts
    ///
    /// The answer is cached for later adds. A failed request counts as denied.
    pub fn request_alert_permission(&mut self) -> AlertPermission {
        self.alert_permission = match self.alerter.request_permission() {
            Ok(permission) => {
                tracing::info!("Alert permission: {:?}", permission);
                permission
            },
            Err(e) => {
                tracing::warn!("Alert permission request failed: {}", e);
                AlertPermission::Denied
            },
        };
        self.alert_permission
    }

    pub fn alert_permission(&self) -> AlertPermission {
        self.alert_permission
    }

    /// Persist, then fan out to subscribers
    fn commit(&self) {
        self.persist();
        self.subscribers.notify(&self.notifications);
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.notifications) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("Failed to serialize notifications: {}", e);
                return;
            },
        };

        if let Err(e) = self.blob_store.set(&self.storage_key, &blob) {
            tracing::warn!("Failed to persist notifications: {}", e);
        }
    }

    fn alert(&self, notification: &Notification) {
        if !self.alert_permission.is_granted() {
            return;
        }
        if let Err(e) = self.alerter.show(&Alert::from(notification)) {
            tracing::warn!("Failed to show alert for {}: {}", notification.id, e);
        }
    }
}
