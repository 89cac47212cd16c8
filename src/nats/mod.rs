//! NATS messaging client

mod client;

pub use client::NatsClient;
