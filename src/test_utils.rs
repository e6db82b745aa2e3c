//! Test utilities for bus-notifier
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::alert::{Alert, AlertPermission, Alerter};
use crate::core::{NewNotification, Notification, NotificationType};
use crate::error::{NotifierError, Result};
use crate::storage::{BlobStore, MemoryBlobStore};
use crate::store::{DEFAULT_STORAGE_KEY, NotificationStore, Subscription};
use std::sync::{Arc, Mutex};

/// Test fixture wrapping a store over a shared in-memory blob
pub struct TestStore {
    pub blob: MemoryBlobStore,
    pub store: NotificationStore,
}

impl TestStore {
    /// Create an empty store with alerts disabled
    pub fn new() -> Self {
        let blob = MemoryBlobStore::new();
        let store = NotificationStore::new(blob.clone());
        Self { blob, store }
    }

    /// Create an empty store using `alerter`
    pub fn with_alerter(alerter: impl Alerter + 'static) -> Self {
        let blob = MemoryBlobStore::new();
        let store = NotificationStore::new(blob.clone()).with_alerter(alerter);
        Self { blob, store }
    }

    /// Add a general notification titled `title`
    pub fn add(&mut self, title: &str) -> Notification {
        self.store.add_notification(new_notification(title, NotificationType::General))
    }

    /// A second store over the same blob, as after a restart
    pub fn reopen(&self) -> NotificationStore {
        NotificationStore::new(self.blob.clone())
    }

    /// What is currently persisted under the default key
    pub fn persisted(&self) -> Vec<Notification> {
        let blob = self
            .blob
            .get(DEFAULT_STORAGE_KEY)
            .expect("Failed to read blob")
            .expect("Nothing persisted");
        serde_json::from_str(&blob).expect("Persisted blob is not valid JSON")
    }
}

/// Create a notification ready to be added
pub fn new_notification(title: &str, kind: NotificationType) -> NewNotification {
    NewNotification::new(title, format!("Message for {title}"), kind)
}

/// Subscribe a listener recording every snapshot it receives
pub fn collect_snapshots(
    store: &NotificationStore,
) -> (Arc<Mutex<Vec<Vec<Notification>>>>, Subscription) {
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);
    let subscription = store.subscribe(move |snapshot| {
        sink.lock().unwrap().push(snapshot.to_vec());
    });
    (snapshots, subscription)
}

/// Alerter recording what it was asked to show
///
/// Clones share the record, so a test can keep one clone and hand the other
/// to the store.
#[derive(Debug, Clone)]
pub struct RecordingAlerter {
    permission: Arc<Mutex<AlertPermission>>,
    shown: Arc<Mutex<Vec<Alert>>>,
    fail: bool,
}

impl RecordingAlerter {
    pub fn new(permission: AlertPermission) -> Self {
        Self {
            permission: Arc::new(Mutex::new(permission)),
            shown: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Make permission requests and `show` fail
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Change the platform answer behind the store's back
    pub fn set_permission(&self, permission: AlertPermission) {
        *self.permission.lock().unwrap() = permission;
    }

    pub fn shown(&self) -> Vec<Alert> {
        self.shown.lock().unwrap().clone()
    }
}

impl Alerter for RecordingAlerter {
    fn permission(&self) -> AlertPermission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&mut self) -> Result<AlertPermission> {
        if self.fail {
            return Err(NotifierError::Alert("permission prompt failed".to_string()));
        }
        let mut permission = self.permission.lock().unwrap();
        if *permission == AlertPermission::Default {
            *permission = AlertPermission::Granted;
        }
        Ok(*permission)
    }

    fn show(&self, alert: &Alert) -> Result<()> {
        if self.fail {
            return Err(NotifierError::Alert("display failed".to_string()));
        }
        self.shown.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

/// Macro for quickly creating notifications to add
#[macro_export]
macro_rules! test_notification {
    ($title:expr) => {
        $crate::test_utils::new_notification($title, $crate::core::NotificationType::General)
    };
    ($title:expr, $kind:expr) => {
        $crate::test_utils::new_notification($title, $kind)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_persists() {
        let mut fixture = TestStore::new();
        fixture.add("one");

        let persisted = fixture.persisted();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].message, "Message for one");
    }

    #[test]
    fn test_macro_kinds() {
        let ticket = test_notification!("Booked", NotificationType::TicketCreated);
        assert_eq!(ticket.kind, NotificationType::TicketCreated);
        assert_eq!(test_notification!("Hi").kind, NotificationType::General);
    }

    #[test]
    fn test_recording_alerter_grants_on_request() {
        let mut alerter = RecordingAlerter::new(AlertPermission::Default);
        assert_eq!(alerter.request_permission().unwrap(), AlertPermission::Granted);

        let mut denied = RecordingAlerter::new(AlertPermission::Denied);
        assert_eq!(denied.request_permission().unwrap(), AlertPermission::Denied);
    }
}
