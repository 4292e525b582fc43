//! Notification payloads.

use crate::checkout::CheckoutFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    /// Machine-readable reason for failures, e.g. `NO_ADDRESS`.
    pub code: Option<&'static str>,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            code: None,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            code: None,
            message: message.into(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            code: Some(code),
            message: message.into(),
        }
    }
}

impl From<&CheckoutFailure> for Notification {
    fn from(failure: &CheckoutFailure) -> Self {
        Notification::error(failure.reason.code(), failure.message.clone())
    }
}
