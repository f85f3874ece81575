//! Sinks for level-up and badge-unlock notifications.

use pokexp_core::constants::{DEFAULT_NOTIFY_CHANNEL_CAPACITY, NOTIFY_CHANNEL_CAPACITY_ENV};
use pokexp_core::{env_parse_with_default, ProgressNotification};
use serde::Serialize;
use tokio::sync::broadcast;

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotification {
    pub user_key: String,
    pub notification: ProgressNotification,
    pub message: String,
}

impl UserNotification {
    #[must_use]
    pub fn new(user_key: &str, notification: ProgressNotification) -> Self {
        let message = notification.to_string();
        Self { user_key: user_key.trim().to_owned(), notification, message }
    }
}

/// Presentation hook. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &UserNotification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &UserNotification) {
        tracing::info!(user = %notification.user_key, "{}", notification.message);
    }
}

/// Fans notifications out to any number of subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<UserNotification>,
}

impl BroadcastNotifier {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Capacity from `POKEXP_NOTIFY_CAPACITY`, falling back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env_parse_with_default(
            NOTIFY_CHANNEL_CAPACITY_ENV,
            DEFAULT_NOTIFY_CHANNEL_CAPACITY,
        ))
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<UserNotification> {
        self.tx.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: &UserNotification) {
        if self.tx.send(notification.clone()).is_err() {
            tracing::debug!("No subscribers for progress notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_notification_carries_message() {
        let n = UserNotification::new(" ash ", ProgressNotification::LevelUp { level: 2 });
        assert_eq!(n.user_key, "ash");
        assert_eq!(n.message, "Congratulations! You leveled up to Level 2!");
    }

    #[tokio::test]
    async fn broadcast_reaches_subscriber() {
        let notifier = BroadcastNotifier::new(4);
        let mut rx = notifier.subscribe();
        let n = UserNotification::new("ash", ProgressNotification::LevelUp { level: 3 });
        notifier.notify(&n);
        assert_eq!(rx.recv().await.unwrap(), n);
    }

    #[test]
    fn from_env_uses_default_capacity() {
        // SAFETY: test-only env mutation
        unsafe { std::env::remove_var(NOTIFY_CHANNEL_CAPACITY_ENV) };
        let notifier = BroadcastNotifier::from_env();
        let _rx = notifier.subscribe();
        notifier.notify(&UserNotification::new("ash", ProgressNotification::LevelUp { level: 2 }));
    }

    #[test]
    fn broadcast_without_subscribers_is_fine() {
        let notifier = BroadcastNotifier::new(0);
        notifier.notify(&UserNotification::new("ash", ProgressNotification::LevelUp { level: 2 }));
    }
}
