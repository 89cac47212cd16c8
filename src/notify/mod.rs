//! Status-change notifications
//!
//! The engine emits one [`StatusNotification`] per committed transition and
//! moves on: delivery is best-effort, and a failed publish never rolls back
//! the transition. Recipient resolution (which queue, which department,
//! which teacher) lives here, not in the engine.

mod messages;
mod nats;

use async_trait::async_trait;
use std::sync::Mutex;

use crate::types::Result;

pub use messages::{StatusNotification, NOTIFY_SUBJECT_PREFIX};
pub use nats::NatsNotifier;

/// Messaging collaborator contract
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a status-change notification to its audience
    async fn notify(&self, notification: &StatusNotification) -> Result<()>;
}

/// Notifier that records everything it is asked to send
///
/// Test double for this crate's own tests and for embedders.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<StatusNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications recorded so far
    pub fn sent(&self) -> Vec<StatusNotification> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &StatusNotification) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
        Ok(())
    }
}
