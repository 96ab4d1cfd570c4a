//! User notifications
//!
//! Notifications are fire-and-forget: the behaviors hand one to a
//! [`Notifier`] and carry on, nothing waits for the user to acknowledge it.

use std::sync::{Arc, Mutex};

use crate::messages::{Locale, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: Message,
    /// Localized text shown to the user
    pub text: String,
}

/// Delivery channel for notifications (toast, status bar, log, ...)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("✔ {}", notification.text),
            NotificationLevel::Info => tracing::info!("{}", notification.text),
            NotificationLevel::Error => tracing::warn!("✘ {}", notification.text),
        }
    }
}

/// Keeps every notification in order of delivery
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.text).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification);
    }
}

/// Localizes messages and hands them to the notifier
#[derive(Clone)]
pub struct Announcer {
    notifier: Arc<dyn Notifier>,
    locale: Locale,
}

impl Announcer {
    pub fn new(notifier: Arc<dyn Notifier>, locale: Locale) -> Self {
        Self { notifier, locale }
    }

    pub fn success(&self, message: Message) {
        self.announce(NotificationLevel::Success, message);
    }

    pub fn info(&self, message: Message) {
        self.announce(NotificationLevel::Info, message);
    }

    pub fn error(&self, message: Message) {
        self.announce(NotificationLevel::Error, message);
    }

    fn announce(&self, level: NotificationLevel, message: Message) {
        let text = message.text(self.locale);
        self.notifier.notify(Notification { level, message, text });
    }
}
