//! Notification channel factory and the sending handle.

use tokio::sync::mpsc;
use tracing::debug;

use super::types::Notification;

/// Default buffer size for the notification channel.
pub const DEFAULT_CHANNEL_BUFFER: usize = 64;

/// Sender handle for notifications.
pub type NotificationSender = mpsc::Sender<Notification>;
/// Receiver handle for notifications.
pub type NotificationReceiver = mpsc::Receiver<Notification>;

/// Create a new notification channel.
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Best-effort notification sink.
///
/// Without a sender every notification is discarded, which suits hosts that
/// report outcomes through return values only.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    sender: Option<NotificationSender>,
}

impl Notifier {
    pub fn new(sender: NotificationSender) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Queue a notification without waiting. Dropped if the receiver is gone
    /// or its buffer is full.
    pub fn notify(&self, notification: Notification) {
        let Some(sender) = &self.sender else {
            return;
        };
        if let Err(e) = sender.try_send(notification) {
            debug!("notification dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_delivers_and_tolerates_closed_receiver() {
        let (tx, mut rx) = notification_channel();
        let notifier = Notifier::new(tx);
        notifier.notify(Notification::success("Payment completed"));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Payment completed");

        drop(rx);
        notifier.notify(Notification::info("ignored"));
        Notifier::disabled().notify(Notification::info("ignored"));
    }
}
