//! Heures - approval workflow engine for teaching-hour declarations
//!
//! Instructors declare taught hours (CM/TD/TP) for a course element; each
//! declaration then passes through a three-gate review chain before payment
//! can happen elsewhere:
//!
//! ```text
//! draft --submit--> submitted --verify--> verified --validate--> validated --approve--> approved
//!                        \                    \                      \
//!                         +------reject-------+-------reject---------+--> rejected
//! ```
//!
//! ## Services
//!
//! - **Lifecycle**: the state machine itself - guards, audit stamps,
//!   conditional writes, notification emission
//! - **Visibility**: per-role worklists (pending / already processed)
//! - **Store**: declaration persistence behind a trait, with MongoDB and
//!   in-memory implementations
//! - **Notify**: status-change fan-out over NATS subjects

pub mod auth;
pub mod config;
pub mod db;
pub mod lifecycle;
pub mod logging;
pub mod nats;
pub mod notify;
pub mod store;
pub mod types;
pub mod visibility;

pub use auth::{Actor, Role};
pub use config::Args;
pub use db::schemas::{DeclarationDoc, PaymentStatus, Status};
pub use lifecycle::{Decision, DeclarationUpdate, Gate, LifecycleEngine, NewDeclaration};
pub use notify::{NatsNotifier, Notifier, RecordingNotifier, StatusNotification};
pub use store::{DeclarationStore, MemoryDeclarationStore, MongoDeclarationStore};
pub use types::{HeuresError, Result};
pub use visibility::VisibilityResolver;
