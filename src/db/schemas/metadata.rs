//! Common metadata for all documents
//!
//! Tracks creation and update timestamps. Declarations are hard-deleted
//! (draft-only), so there is no soft-delete flag here.

use bson::DateTime;
use serde::{Deserialize, Serialize};

/// Common metadata for all documents
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Metadata {
    /// When the document was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,

    /// When the document was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Metadata {
    /// Create new metadata with created and updated set to the same instant
    pub fn new() -> Self {
        let now = DateTime::now();
        Self {
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Bump the updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Some(DateTime::now());
    }
}
