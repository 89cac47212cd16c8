//! NATS client wrapper
//!
//! Connection management with keep-alive and optional credentials.

use async_nats::{Client, ConnectOptions};
use bytes::Bytes;
use std::time::Duration;
use tracing::info;

use crate::config::NatsArgs;
use crate::types::HeuresError;

/// Default ping interval for keep-alive
const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(120);

/// NATS client wrapper
#[derive(Clone)]
pub struct NatsClient {
    /// Underlying NATS client
    client: Client,
    /// Client name for logging
    name: String,
}

impl NatsClient {
    /// Create a new NATS client
    pub async fn new(args: &NatsArgs, name: &str) -> Result<Self, HeuresError> {
        info!("Connecting to NATS at {}", args.nats_url);

        // Don't use retry_on_initial_connect() - we want fast failure if NATS isn't available
        // Reconnection will still work after initial successful connection
        let mut options = ConnectOptions::new()
            .name(name)
            .ping_interval(DEFAULT_PING_INTERVAL)
            .connection_timeout(Duration::from_secs(5));

        if let (Some(user), Some(pass)) = (&args.nats_user, &args.nats_password) {
            options = options.user_and_password(user.clone(), pass.clone());
        }

        let client = options
            .connect(&args.nats_url)
            .await
            .map_err(|e| HeuresError::Nats(format!("Failed to connect: {}", e)))?;

        info!("Connected to NATS at {}", args.nats_url);

        Ok(Self {
            client,
            name: name.to_string(),
        })
    }

    /// Get the underlying NATS client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Client name used at connect time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish a message to a subject
    pub async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), HeuresError> {
        self.client
            .publish(subject.to_string(), payload)
            .await
            .map_err(|e| HeuresError::Nats(format!("Publish failed: {}", e)))
    }

    /// Flush pending publishes to the server
    pub async fn flush(&self) -> Result<(), HeuresError> {
        self.client
            .flush()
            .await
            .map_err(|e| HeuresError::Nats(format!("Flush failed: {}", e)))
    }
}
