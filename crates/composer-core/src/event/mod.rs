//! User-facing notifications.
//!
//! Background operations report through the [`Notifier`] port; the default
//! implementation is a `NotificationBus` that fans notifications out to all
//! subscribers via a `tokio::sync::broadcast` channel.

pub mod bus;

pub use bus::NotificationBus;

use composer_types::notification::Notification;

/// Sink for notifications raised by the orchestrator and friends.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
