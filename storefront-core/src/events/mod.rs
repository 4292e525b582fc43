//! User-facing notifications.
//!
//! The checkout emits one [`Notification`] per finished attempt (success or
//! failure). A host renders them as toasts. Delivery is best-effort: a full
//! or closed channel drops the notification instead of blocking the
//! checkout.

pub mod channels;
pub mod types;

pub use channels::{
    DEFAULT_CHANNEL_BUFFER, NotificationReceiver, NotificationSender, Notifier,
    notification_channel,
};
pub use types::{Notification, NotificationLevel};
