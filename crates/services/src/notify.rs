use std::sync::{Arc, Mutex};

use trivia_core::model::Notification;

/// Fire-and-forget display of user-facing notifications.
pub trait NotificationSink: Send + Sync {
    fn show(&self, notification: Notification);
}

/// Keeps every notification in memory, for tests and headless drivers.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything shown so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.shown
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Drain and return everything shown so far.
    pub fn take(&self) -> Vec<Notification> {
        self.shown
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, notification: Notification) {
        if let Ok(mut guard) = self.shown.lock() {
            guard.push(notification);
        }
    }
}
