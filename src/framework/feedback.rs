//! # Feedback Channel
//!
//! User-visible notifications ("toasts"). Every settled mutation produces exactly one
//! [`Notification`]; the consumer owns the receiving end and decides how to show it.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    /// Resource the notification refers to (`"projects"`, `"skills"`, ...).
    pub resource: &'static str,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, resource: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            resource,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Receiving end of the feedback channel.
pub type Notifications = mpsc::UnboundedReceiver<Notification>;

/// Sending end of the feedback channel, shared by all collection actors.
#[derive(Clone, Debug)]
pub struct Feedback {
    sender: mpsc::UnboundedSender<Notification>,
}

/// Creates a feedback channel.
pub fn feedback_channel() -> (Feedback, Notifications) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Feedback { sender }, receiver)
}

impl Feedback {
    pub fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            trace!("Feedback receiver dropped; notification discarded");
        }
    }

    pub fn success(&self, resource: &'static str, message: impl Into<String>) {
        self.notify(Notification::new(NotificationLevel::Success, resource, message));
    }

    pub fn info(&self, resource: &'static str, message: impl Into<String>) {
        self.notify(Notification::new(NotificationLevel::Info, resource, message));
    }

    pub fn error(&self, resource: &'static str, message: impl Into<String>) {
        self.notify(Notification::new(NotificationLevel::Error, resource, message));
    }
}
