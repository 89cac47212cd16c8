//! NATS-backed notifier
//!
//! Publishes the JSON payload to every audience subject. Downstream
//! consumers (mail bridge, chat assistant, dashboards) subscribe to the
//! role/department/teacher subjects they care about.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::nats::NatsClient;
use crate::notify::{Notifier, StatusNotification};
use crate::types::{HeuresError, Result};

/// Notifier publishing status changes over NATS
#[derive(Clone)]
pub struct NatsNotifier {
    client: NatsClient,
}

impl NatsNotifier {
    pub fn new(client: NatsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for NatsNotifier {
    async fn notify(&self, notification: &StatusNotification) -> Result<()> {
        let payload = serde_json::to_vec(notification)
            .map_err(|e| HeuresError::Nats(format!("Failed to encode notification: {}", e)))?;
        let payload = Bytes::from(payload);

        for subject in notification.subjects() {
            self.client.publish(&subject, payload.clone()).await?;
            debug!(
                "Published notification {} to {}",
                notification.notification_id, subject
            );
        }

        Ok(())
    }
}
