use super::{ChannelTransport, PushTransport};
use crate::alert::AlertPermission;
use crate::config::TransportConfig;
use crate::store::NotificationStore;

/// Start-up sequence run by the owning application
///
/// Requests alert permission, starts the transport and subscribes the
/// per-user topic (when a user is known) and the general topic. Failures are
/// logged and skipped; the store works without a transport. Returns the
/// topics that were subscribed.
pub fn initialize(
    store: &mut NotificationStore,
    transport: &mut dyn PushTransport,
    user_id: Option<&str>,
    config: &TransportConfig,
) -> Vec<String> {
    if store.request_alert_permission() != AlertPermission::Granted {
        tracing::info!("Alerts are not permitted; notifications will be stored silently");
    }

    if let Err(e) = transport.start() {
        tracing::warn!("Failed to start push transport: {}", e);
        return Vec::new();
    }

    let topics = user_id
        .map(|id| config.user_topic(id))
        .into_iter()
        .chain(std::iter::once(config.general_topic.clone()));

    let mut subscribed = Vec::new();
    for topic in topics {
        match transport.subscribe_topic(&topic) {
            Ok(()) => subscribed.push(topic),
            Err(e) => tracing::warn!("Failed to subscribe to topic {}: {}", topic, e),
        }
    }
    subscribed
}

/// Feed every delivered message into the store until the stream ends
///
/// Returns the number of notifications added.
pub async fn pump(store: &mut NotificationStore, transport: &mut ChannelTransport) -> usize {
    let mut ingested = 0;
    while let Some(message) = transport.recv().await {
        let added = store.add_notification(message.into());
        tracing::info!("Received push notification {}", added.id);
        ingested += 1;
    }
    ingested
}

/// Ingest whatever is already queued, without waiting
pub fn drain_pending(store: &mut NotificationStore, transport: &mut ChannelTransport) -> usize {
    let mut ingested = 0;
    while let Some(message) = transport.try_recv() {
        store.add_notification(message.into());
        ingested += 1;
    }
    ingested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotificationType;
    use crate::error::{NotifierError, Result};
    use crate::test_utils::{RecordingAlerter, TestStore};
    use crate::transport::{PushMessage, channel};
    use serde_json::json;

    /// Transport failing on selected steps
    #[derive(Default)]
    struct FlakyTransport {
        fail_start: bool,
        fail_topic: Option<String>,
        subscribed: Vec<String>,
    }

    impl PushTransport for FlakyTransport {
        fn start(&mut self) -> Result<()> {
            if self.fail_start {
                return Err(NotifierError::Transport("no network".to_string()));
            }
            Ok(())
        }

        fn subscribe_topic(&mut self, topic: &str) -> Result<()> {
            if self.fail_topic.as_deref() == Some(topic) {
                return Err(NotifierError::Transport("rejected".to_string()));
            }
            self.subscribed.push(topic.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_initialize_subscribes_user_and_general_topics() {
        let alerter = RecordingAlerter::new(AlertPermission::Default);
        let mut fixture = TestStore::with_alerter(alerter);
        let (_sender, mut transport) = channel();

        let topics = initialize(
            &mut fixture.store,
            &mut transport,
            Some("42"),
            &TransportConfig::default(),
        );

        assert_eq!(topics, vec!["user_42", "general"]);
        assert_eq!(transport.topics(), vec!["general", "user_42"]);
        assert!(fixture.store.alert_permission().is_granted());
    }

    #[test]
    fn test_initialize_without_user() {
        let mut fixture = TestStore::new();
        let mut transport = FlakyTransport::default();

        let topics = initialize(
            &mut fixture.store,
            &mut transport,
            None,
            &TransportConfig::default(),
        );

        assert_eq!(topics, vec!["general"]);
    }

    #[test]
    fn test_initialize_survives_failures() {
        let mut fixture = TestStore::new();

        let mut dead = FlakyTransport {
            fail_start: true,
            ..FlakyTransport::default()
        };
        assert!(initialize(&mut fixture.store, &mut dead, Some("1"), &TransportConfig::default()).is_empty());
        assert!(dead.subscribed.is_empty());

        let mut picky = FlakyTransport {
            fail_topic: Some("user_1".to_string()),
            ..FlakyTransport::default()
        };
        let topics = initialize(&mut fixture.store, &mut picky, Some("1"), &TransportConfig::default());
        assert_eq!(topics, vec!["general"]);

        // Store is unaffected by transport trouble
        fixture.add("local");
        assert_eq!(fixture.store.len(), 1);
    }

    #[tokio::test]
    async fn test_pump_ingests_until_closed() {
        let mut fixture = TestStore::new();
        let (sender, mut transport) = channel();
        initialize(
            &mut fixture.store,
            &mut transport,
            Some("42"),
            &TransportConfig::default(),
        );

        let producer = tokio::spawn(async move {
            for i in 0..3 {
                sender
                    .send(PushMessage {
                        topic: Some("user_42".to_string()),
                        title: Some(format!("Trip {i}")),
                        body: Some("Departure confirmed".to_string()),
                        data: serde_json::Map::from_iter([
                            ("type".to_string(), json!("booking_confirmed")),
                            ("bookingId".to_string(), json!(i)),
                        ]),
                    })
                    .unwrap();
            }
        });

        let ingested = pump(&mut fixture.store, &mut transport).await;
        producer.await.unwrap();

        assert_eq!(ingested, 3);
        let list = fixture.store.get_notifications();
        assert_eq!(list[0].title, "Trip 2");
        assert_eq!(list[0].kind, NotificationType::BookingConfirmed);
        assert_eq!(list[0].data, Some(json!({"bookingId": 2})));
        assert_eq!(fixture.persisted().len(), 3);
    }

    #[test]
    fn test_drain_pending() {
        let mut fixture = TestStore::new();
        let (sender, mut transport) = channel();
        transport.start().unwrap();
        transport.subscribe_topic("general").unwrap();

        sender
            .send(PushMessage {
                topic: Some("general".to_string()),
                title: Some("Holiday schedule".to_string()),
                ..PushMessage::default()
            })
            .unwrap();

        assert_eq!(drain_pending(&mut fixture.store, &mut transport), 1);
        assert_eq!(drain_pending(&mut fixture.store, &mut transport), 0);
        assert_eq!(fixture.store.get_unread_count(), 1);
    }
}
