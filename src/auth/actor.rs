//! Roles in the review chain and the authenticated actor descriptor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of roles known to the workflow
///
/// Wire strings keep the French names used across the institution's systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Instructor - creates and submits own declarations
    #[serde(rename = "enseignant")]
    Teacher,
    /// Registrar - first gate, global scope
    #[serde(rename = "scolarite")]
    Registrar,
    /// Department chief - second gate, scoped to own department
    #[serde(rename = "chef_departement")]
    DepartmentChief,
    /// Studies director - third and final gate, global scope
    #[serde(rename = "directrice_etudes")]
    StudiesDirector,
    /// Superuser - full-access views live outside this core
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Wire/display name for the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "enseignant",
            Role::Registrar => "scolarite",
            Role::DepartmentChief => "chef_departement",
            Role::StudiesDirector => "directrice_etudes",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller descriptor supplied by the identity collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// User identifier
    pub id: String,
    /// Role in the review chain
    pub role: Role,
    /// Department the actor belongs to, when the role is department-scoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl Actor {
    /// Create an actor without department affiliation
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            department_id: None,
        }
    }

    /// Create an actor scoped to a department
    pub fn with_department(id: impl Into<String>, role: Role, department_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            department_id: Some(department_id.into()),
        }
    }
}
