//! Review gates and their transition table
//!
//! Each gate names its source status, target status on accept, and the role
//! allowed to act. Reject is the shared alternative outcome at every gate.

use bson::DateTime;
use std::fmt;

use crate::auth::Role;
use crate::db::schemas::{DeclarationDoc, Status};

/// One gatekeeping point in the review chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Registrar reviews submitted declarations
    Verify,
    /// Department chief reviews verified declarations of their department
    Validate,
    /// Studies director reviews validated declarations
    Approve,
}

impl Gate {
    /// All gates, in pipeline order
    pub const ALL: [Gate; 3] = [Gate::Verify, Gate::Validate, Gate::Approve];

    /// Status a declaration must be in for this gate to act
    pub fn source(&self) -> Status {
        match self {
            Gate::Verify => Status::Submitted,
            Gate::Validate => Status::Verified,
            Gate::Approve => Status::Validated,
        }
    }

    /// Status an accept at this gate moves the declaration to
    pub fn target(&self) -> Status {
        match self {
            Gate::Verify => Status::Verified,
            Gate::Validate => Status::Validated,
            Gate::Approve => Status::Approved,
        }
    }

    /// Role authorized to act at this gate
    pub fn reviewer(&self) -> Role {
        match self {
            Gate::Verify => Role::Registrar,
            Gate::Validate => Role::DepartmentChief,
            Gate::Approve => Role::StudiesDirector,
        }
    }

    /// Whether the actor's department must match the declaration's
    pub fn requires_department_match(&self) -> bool {
        matches!(self, Gate::Validate)
    }

    /// Write this gate's accept audit pair
    pub fn stamp(&self, doc: &mut DeclarationDoc, actor_id: &str, at: DateTime) {
        match self {
            Gate::Verify => {
                doc.verified_by = Some(actor_id.to_string());
                doc.verified_at = Some(at);
            }
            Gate::Validate => {
                doc.validated_by = Some(actor_id.to_string());
                doc.validated_at = Some(at);
            }
            Gate::Approve => {
                doc.approved_by = Some(actor_id.to_string());
                doc.approved_at = Some(at);
            }
        }
    }

    /// Read back the actor recorded by this gate's accept stamp
    pub fn stamped_actor<'a>(&self, doc: &'a DeclarationDoc) -> Option<&'a str> {
        match self {
            Gate::Verify => doc.verified_by.as_deref(),
            Gate::Validate => doc.validated_by.as_deref(),
            Gate::Approve => doc.approved_by.as_deref(),
        }
    }

    /// Mongo field name of this gate's accept actor stamp
    pub fn stamp_field(&self) -> &'static str {
        match self {
            Gate::Verify => "verified_by",
            Gate::Validate => "validated_by",
            Gate::Approve => "approved_by",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Verify => write!(f, "verify"),
            Gate::Validate => write!(f, "validate"),
            Gate::Approve => write!(f, "approve"),
        }
    }
}
