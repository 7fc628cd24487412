// In-memory reminder storage. Contents live as long as the process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u64,
    pub message: String,
    pub latitude: f64,
    pub longitude: f64,
    pub preferences: Vec<String>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    reminders: Vec<Reminder>,
}

/// Shared handle to the active reminders. Cloning shares the same list.
#[derive(Clone, Default)]
pub struct ReminderStore {
    inner: Arc<Mutex<Inner>>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reminder under a fresh id. Ids are never handed out twice.
    pub async fn add(
        &self,
        message: impl Into<String>,
        latitude: f64,
        longitude: f64,
        preferences: Vec<String>,
    ) -> Reminder {
        let mut inner = self.inner.lock().await;
        let reminder = Reminder {
            id: inner.next_id,
            message: message.into(),
            latitude,
            longitude,
            preferences,
        };
        inner.next_id += 1;
        inner.reminders.push(reminder.clone());
        tracing::debug!(id = reminder.id, "stored reminder");
        reminder
    }

    /// Remove a reminder, returning whether it existed.
    pub async fn dismiss(&self, id: u64) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.reminders.len();
        inner.reminders.retain(|r| r.id != id);
        let removed = inner.reminders.len() != before;
        tracing::debug!(id, removed, "dismiss reminder");
        removed
    }

    pub async fn list(&self) -> Vec<Reminder> {
        self.inner.lock().await.reminders.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.reminders.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
