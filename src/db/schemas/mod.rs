//! Database schemas for Heures
//!
//! Defines the declaration document structure and shared metadata.

mod declaration;
mod metadata;

pub use declaration::{DeclarationDoc, PaymentStatus, Status, DECLARATION_COLLECTION};
pub use metadata::Metadata;
