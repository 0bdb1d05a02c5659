//! Broadcast bus for distributing `Notification`s to multiple subscribers.
//!
//! Built on `tokio::sync::broadcast`, the `NotificationBus` supports multiple
//! concurrent subscribers. Publishing with no active subscribers is a no-op.

use composer_types::notification::Notification;
use tokio::sync::broadcast;

use super::Notifier;

/// Multi-consumer notification bus.
///
/// Cloning the bus clones the sender, allowing multiple producers and
/// consumers.
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Publish a notification to all current subscribers.
    ///
    /// If there are no subscribers, the notification is silently dropped.
    pub fn publish(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

impl Notifier for NotificationBus {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            title = %notification.title,
            kind = ?notification.kind,
            "notification raised"
        );
        self.publish(notification);
    }
}

impl Clone for NotificationBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
