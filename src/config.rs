//! Configuration for Heures
//!
//! CLI arguments and environment variable handling using clap. The embedding
//! service (HTTP API, batch importer, ...) parses these and wires the engine.

use clap::Parser;

/// Heures - approval workflow engine for teaching-hour declarations
#[derive(Parser, Debug, Clone)]
#[command(name = "heures")]
#[command(about = "Approval workflow engine for teaching-hour declarations")]
pub struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "heures")]
    pub mongodb_db: String,

    /// NATS configuration
    #[command(flatten)]
    pub nats: NatsArgs,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// NATS connection settings
#[derive(clap::Args, Debug, Clone)]
pub struct NatsArgs {
    /// NATS server URL
    #[arg(long, env = "NATS_URL", default_value = "nats://localhost:4222")]
    pub nats_url: String,

    /// NATS username
    #[arg(long, env = "NATS_USER")]
    pub nats_user: Option<String>,

    /// NATS password
    #[arg(long, env = "NATS_PASSWORD")]
    pub nats_password: Option<String>,
}

impl Args {
    /// Cheap sanity checks before any connection attempt
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_db.trim().is_empty() {
            return Err("MONGODB_DB must not be empty".to_string());
        }
        if self.nats.nats_user.is_some() != self.nats.nats_password.is_some() {
            return Err("NATS_USER and NATS_PASSWORD must be set together".to_string());
        }
        Ok(())
    }
}
