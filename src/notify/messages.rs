//! Notification message types and audience routing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{Actor, Role};
use crate::db::schemas::{DeclarationDoc, Status};

/// Subject prefix for status-change notifications
pub const NOTIFY_SUBJECT_PREFIX: &str = "HEURES.NOTIFY";

/// One status change on one declaration, ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusNotification {
    /// Unique notification ID
    pub notification_id: String,

    /// Declaration the change happened on
    pub declaration_id: String,

    /// Owner of the declaration
    pub teacher_id: String,

    /// Department the declaration is routed through
    pub department_id: String,

    /// Course element the hours were declared for
    pub course_element_id: String,

    /// Derived total at the time of the change
    pub total_hours: f64,

    /// Status the declaration moved to
    pub new_status: Status,

    /// Who performed the transition
    pub actor_id: String,
    pub actor_role: Role,

    /// Reason given when the transition was a rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// When the transition was committed
    pub occurred_at: DateTime<Utc>,
}

impl StatusNotification {
    /// Build a notification for a committed transition
    pub fn new(declaration: &DeclarationDoc, actor: &Actor, new_status: Status) -> Self {
        Self {
            notification_id: Uuid::new_v4().to_string(),
            declaration_id: declaration.declaration_id.clone(),
            teacher_id: declaration.teacher_id.clone(),
            department_id: declaration.department_id.clone(),
            course_element_id: declaration.course_element_id.clone(),
            total_hours: declaration.total_hours,
            new_status,
            actor_id: actor.id.clone(),
            actor_role: actor.role,
            rejection_reason: declaration.rejection_reason.clone(),
            occurred_at: Utc::now(),
        }
    }

    /// Resolve the audience as NATS subjects
    ///
    /// The declaration's teacher always hears about the change; the queue of
    /// whichever role acts next hears about it too.
    pub fn subjects(&self) -> Vec<String> {
        let teacher = format!("{NOTIFY_SUBJECT_PREFIX}.TEACHER.{}", self.teacher_id);

        match self.new_status {
            Status::Submitted => vec![
                format!("{NOTIFY_SUBJECT_PREFIX}.ROLE.{}", Role::Registrar),
                teacher,
            ],
            Status::Verified => vec![
                format!("{NOTIFY_SUBJECT_PREFIX}.DEPT.{}", self.department_id),
                teacher,
            ],
            Status::Validated => vec![
                format!("{NOTIFY_SUBJECT_PREFIX}.ROLE.{}", Role::StudiesDirector),
                teacher,
            ],
            Status::Approved | Status::Rejected | Status::Draft => vec![teacher],
        }
    }

    /// Human-readable one-liner for delivery sinks
    pub fn summary(&self) -> String {
        match (&self.new_status, &self.rejection_reason) {
            (Status::Rejected, Some(reason)) => format!(
                "Declaration {} ({}h) rejected by {} {}: {}",
                self.declaration_id, self.total_hours, self.actor_role, self.actor_id, reason
            ),
            _ => format!(
                "Declaration {} ({}h) is now {} ({} by {})",
                self.declaration_id, self.total_hours, self.new_status, self.actor_role, self.actor_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn declaration() -> DeclarationDoc {
        DeclarationDoc::new(
            "t-9".into(),
            "d-info".into(),
            "ce-3".into(),
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            2.0,
            1.0,
            0.0,
        )
    }

    #[test]
    fn test_submitted_routes_to_registrar_and_teacher() {
        let actor = Actor::new("t-9", Role::Teacher);
        let n = StatusNotification::new(&declaration(), &actor, Status::Submitted);
        assert_eq!(
            n.subjects(),
            vec![
                "HEURES.NOTIFY.ROLE.scolarite".to_string(),
                "HEURES.NOTIFY.TEACHER.t-9".to_string(),
            ]
        );
    }

    #[test]
    fn test_verified_routes_to_department_queue() {
        let actor = Actor::new("reg-1", Role::Registrar);
        let n = StatusNotification::new(&declaration(), &actor, Status::Verified);
        assert!(n
            .subjects()
            .contains(&"HEURES.NOTIFY.DEPT.d-info".to_string()));
    }

    #[test]
    fn test_terminal_statuses_route_to_teacher_only() {
        let actor = Actor::new("dir-1", Role::StudiesDirector);
        let n = StatusNotification::new(&declaration(), &actor, Status::Approved);
        assert_eq!(n.subjects(), vec!["HEURES.NOTIFY.TEACHER.t-9".to_string()]);
    }

    #[test]
    fn test_rejection_summary_carries_reason() {
        let mut decl = declaration();
        decl.rejection_reason = Some("incomplete data".into());
        let actor = Actor::new("reg-1", Role::Registrar);
        let n = StatusNotification::new(&decl, &actor, Status::Rejected);
        assert!(n.summary().contains("incomplete data"));
        assert!(n.summary().contains("scolarite"));
    }
}
