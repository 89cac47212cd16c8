//! Declaration document schema
//!
//! A declaration is an instructor's claim of taught hours (CM/TD/TP) for a
//! course element, reviewed in three stages before payment. The audit stamps
//! are append-only: an earlier gate's stamp survives a later rejection.

use bson::{doc, oid::ObjectId, DateTime, Document};
use chrono::NaiveDate;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::db::mongo::IntoIndexes;
use crate::db::schemas::Metadata;

/// Collection name for declarations
pub const DECLARATION_COLLECTION: &str = "declarations";

/// Review status of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Editable by its owner, not yet in review
    #[default]
    Draft,
    /// Waiting on the registrar
    Submitted,
    /// Registrar accepted, waiting on the department chief
    Verified,
    /// Department chief accepted, waiting on the studies director
    Validated,
    /// Studies director accepted - final
    Approved,
    /// Refused at one of the three gates - final
    Rejected,
}

impl Status {
    /// Wire/filter string for the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Submitted => "submitted",
            Status::Verified => "verified",
            Status::Validated => "validated",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status, owned by the payroll side - the engine only initializes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

/// Declaration document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DeclarationDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Public opaque identifier (uuid)
    pub declaration_id: String,

    /// Owner - the instructor who created the declaration (immutable)
    pub teacher_id: String,

    /// Department routing for the second gate (immutable)
    pub department_id: String,

    /// Leaf of the academic hierarchy the hours were taught for
    pub course_element_id: String,

    /// Date the declared teaching took place
    pub declaration_date: NaiveDate,

    /// Lecture hours
    pub cm_hours: f64,
    /// Directed-exercise hours
    pub td_hours: f64,
    /// Practical-work hours
    pub tp_hours: f64,
    /// Derived - always cm + td + tp, never set independently
    pub total_hours: f64,

    /// Current review status
    #[serde(default)]
    pub status: Status,

    /// Payment status, defaults to unpaid
    #[serde(default)]
    pub payment_status: PaymentStatus,

    /// When the owner submitted the declaration for review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime>,

    /// Registrar who accepted at the first gate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime>,

    /// Department chief who accepted at the second gate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<DateTime>,

    /// Studies director who accepted at the final gate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime>,

    /// Reviewer who rejected, at whichever gate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl DeclarationDoc {
    /// Create a new draft declaration owned by `teacher_id`
    pub fn new(
        teacher_id: String,
        department_id: String,
        course_element_id: String,
        declaration_date: NaiveDate,
        cm_hours: f64,
        td_hours: f64,
        tp_hours: f64,
    ) -> Self {
        let mut doc = Self {
            _id: None,
            metadata: Metadata::new(),
            declaration_id: Uuid::new_v4().to_string(),
            teacher_id,
            department_id,
            course_element_id,
            declaration_date,
            cm_hours,
            td_hours,
            tp_hours,
            total_hours: 0.0,
            status: Status::Draft,
            payment_status: PaymentStatus::Unpaid,
            submitted_at: None,
            verified_by: None,
            verified_at: None,
            validated_by: None,
            validated_at: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
        };
        doc.recompute_total();
        doc
    }

    /// Recompute the derived total from the three hour fields
    pub fn recompute_total(&mut self) {
        self.total_hours = self.cm_hours + self.td_hours + self.tp_hours;
    }
}

impl IntoIndexes for DeclarationDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Unique index on the public identifier
            (
                doc! { "declaration_id": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("declaration_id_unique".to_string())
                        .build(),
                ),
            ),
            // Owner worklists
            (
                doc! { "teacher_id": 1, "status": 1 },
                Some(
                    IndexOptions::builder()
                        .name("teacher_status_index".to_string())
                        .build(),
                ),
            ),
            // Role queues
            (
                doc! { "status": 1 },
                Some(
                    IndexOptions::builder()
                        .name("status_index".to_string())
                        .build(),
                ),
            ),
            // Department chief queue
            (
                doc! { "department_id": 1, "status": 1 },
                Some(
                    IndexOptions::builder()
                        .name("department_status_index".to_string())
                        .build(),
                ),
            ),
            // Processed-by lookups per audit stamp
            (
                doc! { "verified_by": 1 },
                Some(
                    IndexOptions::builder()
                        .name("verified_by_index".to_string())
                        .build(),
                ),
            ),
            (
                doc! { "validated_by": 1 },
                Some(
                    IndexOptions::builder()
                        .name("validated_by_index".to_string())
                        .build(),
                ),
            ),
            (
                doc! { "approved_by": 1 },
                Some(
                    IndexOptions::builder()
                        .name("approved_by_index".to_string())
                        .build(),
                ),
            ),
            (
                doc! { "rejected_by": 1 },
                Some(
                    IndexOptions::builder()
                        .name("rejected_by_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}
