//! Lifecycle engine for declarations
//!
//! All guard checks run against a fresh snapshot, and every status change is
//! persisted conditionally on the status that snapshot had. A concurrent
//! transition that wins the race makes the conditional write miss, and the
//! loser surfaces `InvalidState` instead of clobbering the record.

use bson::DateTime;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{Actor, Role};
use crate::db::schemas::{DeclarationDoc, Status};
use crate::lifecycle::Gate;
use crate::notify::{Notifier, StatusNotification};
use crate::store::DeclarationStore;
use crate::types::{HeuresError, Result};

/// Outcome a reviewer chooses at a gate
#[derive(Debug, Clone)]
pub enum Decision {
    Accept,
    Reject {
        /// Mandatory, non-empty explanation recorded on the declaration
        reason: String,
    },
}

/// Input for creating a draft declaration
#[derive(Debug, Clone)]
pub struct NewDeclaration {
    pub department_id: String,
    pub course_element_id: String,
    /// Defaults to today when not given
    pub declaration_date: Option<NaiveDate>,
    pub cm_hours: f64,
    pub td_hours: f64,
    pub tp_hours: f64,
}

/// Replacement content for a draft declaration
#[derive(Debug, Clone)]
pub struct DeclarationUpdate {
    pub course_element_id: String,
    pub declaration_date: NaiveDate,
    pub cm_hours: f64,
    pub td_hours: f64,
    pub tp_hours: f64,
}

/// The declaration lifecycle engine
///
/// Stateless over its collaborators: every call reads fresh from the store
/// and writes back conditionally.
pub struct LifecycleEngine {
    store: Arc<dyn DeclarationStore>,
    notifier: Arc<dyn Notifier>,
}

impl LifecycleEngine {
    pub fn new(store: Arc<dyn DeclarationStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Create a new draft declaration owned by the calling teacher
    pub async fn create(&self, actor: &Actor, input: NewDeclaration) -> Result<DeclarationDoc> {
        if actor.role != Role::Teacher {
            return Err(HeuresError::Forbidden(format!(
                "role '{}' may not create declarations",
                actor.role
            )));
        }
        check_hours(input.cm_hours, input.td_hours, input.tp_hours)?;

        let doc = DeclarationDoc::new(
            actor.id.clone(),
            input.department_id,
            input.course_element_id,
            input
                .declaration_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            input.cm_hours,
            input.td_hours,
            input.tp_hours,
        );

        self.store.insert(&doc).await?;
        info!(
            "Declaration {} created by teacher {}",
            doc.declaration_id, actor.id
        );
        Ok(doc)
    }

    /// Replace the content of a draft declaration (owner only)
    pub async fn update(
        &self,
        actor: &Actor,
        declaration_id: &str,
        input: DeclarationUpdate,
    ) -> Result<DeclarationDoc> {
        let mut doc = self.load(declaration_id).await?;
        self.check_owner(&doc, actor)?;
        self.check_editable(&doc)?;
        check_hours(input.cm_hours, input.td_hours, input.tp_hours)?;

        doc.course_element_id = input.course_element_id;
        doc.declaration_date = input.declaration_date;
        doc.cm_hours = input.cm_hours;
        doc.td_hours = input.td_hours;
        doc.tp_hours = input.tp_hours;
        doc.recompute_total();
        doc.metadata.touch();

        if !self
            .store
            .replace_if_status(declaration_id, Status::Draft, &doc)
            .await?
        {
            // Lost the race: the draft was submitted or deleted underneath us
            return match self.store.get(declaration_id).await? {
                None => Err(HeuresError::NotFound(declaration_id.to_string())),
                Some(_) => Err(HeuresError::Forbidden(
                    "declaration is no longer editable".to_string(),
                )),
            };
        }
        Ok(doc)
    }

    /// Remove a draft declaration (owner only)
    pub async fn delete(&self, actor: &Actor, declaration_id: &str) -> Result<()> {
        let doc = self.load(declaration_id).await?;
        self.check_owner(&doc, actor)?;
        self.check_editable(&doc)?;

        if !self
            .store
            .delete_if_status(declaration_id, Status::Draft)
            .await?
        {
            return match self.store.get(declaration_id).await? {
                None => Err(HeuresError::NotFound(declaration_id.to_string())),
                Some(_) => Err(HeuresError::Forbidden(
                    "declaration is no longer editable".to_string(),
                )),
            };
        }
        info!(
            "Declaration {} deleted by teacher {}",
            declaration_id, actor.id
        );
        Ok(())
    }

    /// Submit a draft for review (owner only): draft -> submitted
    pub async fn submit(&self, actor: &Actor, declaration_id: &str) -> Result<DeclarationDoc> {
        let mut doc = self.load(declaration_id).await?;
        if doc.status != Status::Draft {
            return Err(HeuresError::InvalidState {
                id: declaration_id.to_string(),
                current: doc.status,
                expected: Status::Draft,
            });
        }
        self.check_owner(&doc, actor)?;

        doc.status = Status::Submitted;
        doc.submitted_at = Some(DateTime::now());
        doc.metadata.touch();

        self.commit(declaration_id, Status::Draft, &doc).await?;
        self.emit(&doc, actor).await;
        Ok(doc)
    }

    /// First gate: registrar reviews a submitted declaration
    pub async fn verify(
        &self,
        actor: &Actor,
        declaration_id: &str,
        decision: Decision,
    ) -> Result<DeclarationDoc> {
        self.review(Gate::Verify, actor, declaration_id, decision)
            .await
    }

    /// Second gate: department chief reviews a verified declaration
    pub async fn validate(
        &self,
        actor: &Actor,
        declaration_id: &str,
        decision: Decision,
    ) -> Result<DeclarationDoc> {
        self.review(Gate::Validate, actor, declaration_id, decision)
            .await
    }

    /// Final gate: studies director reviews a validated declaration
    pub async fn approve(
        &self,
        actor: &Actor,
        declaration_id: &str,
        decision: Decision,
    ) -> Result<DeclarationDoc> {
        self.review(Gate::Approve, actor, declaration_id, decision)
            .await
    }

    /// Shared gate path: guards in order, then the conditional write
    async fn review(
        &self,
        gate: Gate,
        actor: &Actor,
        declaration_id: &str,
        decision: Decision,
    ) -> Result<DeclarationDoc> {
        let mut doc = self.load(declaration_id).await?;

        if doc.status != gate.source() {
            return Err(HeuresError::InvalidState {
                id: declaration_id.to_string(),
                current: doc.status,
                expected: gate.source(),
            });
        }

        if actor.role != gate.reviewer() {
            return Err(HeuresError::Forbidden(format!(
                "role '{}' may not {} declarations",
                actor.role, gate
            )));
        }

        if gate.requires_department_match()
            && actor.department_id.as_deref() != Some(doc.department_id.as_str())
        {
            return Err(HeuresError::Forbidden(format!(
                "department chief may only {} declarations of their own department",
                gate
            )));
        }

        let now = DateTime::now();
        match decision {
            Decision::Accept => {
                doc.status = gate.target();
                gate.stamp(&mut doc, &actor.id, now);
            }
            Decision::Reject { reason } => {
                if reason.trim().is_empty() {
                    return Err(HeuresError::Validation(
                        "rejection reason must not be empty".to_string(),
                    ));
                }
                doc.status = Status::Rejected;
                doc.rejected_by = Some(actor.id.clone());
                doc.rejected_at = Some(now);
                doc.rejection_reason = Some(reason);
            }
        }
        doc.metadata.touch();

        self.commit(declaration_id, gate.source(), &doc).await?;
        info!(
            "Declaration {} {} -> {} by {} {}",
            declaration_id,
            gate.source(),
            doc.status,
            actor.role,
            actor.id
        );
        self.emit(&doc, actor).await;
        Ok(doc)
    }

    async fn load(&self, declaration_id: &str) -> Result<DeclarationDoc> {
        self.store
            .get(declaration_id)
            .await?
            .ok_or_else(|| HeuresError::NotFound(declaration_id.to_string()))
    }

    fn check_owner(&self, doc: &DeclarationDoc, actor: &Actor) -> Result<()> {
        if doc.teacher_id != actor.id {
            return Err(HeuresError::Forbidden(
                "only the declaration's teacher may perform this action".to_string(),
            ));
        }
        Ok(())
    }

    fn check_editable(&self, doc: &DeclarationDoc) -> Result<()> {
        if doc.status != Status::Draft {
            return Err(HeuresError::Forbidden(
                "declaration is no longer editable".to_string(),
            ));
        }
        Ok(())
    }

    /// Conditional write; a miss means the source status moved underneath us
    async fn commit(
        &self,
        declaration_id: &str,
        expected: Status,
        doc: &DeclarationDoc,
    ) -> Result<()> {
        if self
            .store
            .replace_if_status(declaration_id, expected, doc)
            .await?
        {
            return Ok(());
        }
        match self.store.get(declaration_id).await? {
            None => Err(HeuresError::NotFound(declaration_id.to_string())),
            Some(current) => Err(HeuresError::InvalidState {
                id: declaration_id.to_string(),
                current: current.status,
                expected,
            }),
        }
    }

    /// Fire-and-forget notification; the transition is already committed
    async fn emit(&self, doc: &DeclarationDoc, actor: &Actor) {
        let notification = StatusNotification::new(doc, actor, doc.status);
        if let Err(e) = self.notifier.notify(&notification).await {
            warn!(
                "Notification delivery failed for declaration {}: {}",
                doc.declaration_id, e
            );
        }
    }
}

fn check_hours(cm: f64, td: f64, tp: f64) -> Result<()> {
    for (name, value) in [("cm_hours", cm), ("td_hours", td), ("tp_hours", tp)] {
        if !value.is_finite() || value < 0.0 {
            return Err(HeuresError::Validation(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::store::MemoryDeclarationStore;
    use async_trait::async_trait;

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _notification: &StatusNotification) -> Result<()> {
            Err(HeuresError::Nats("broker unreachable".to_string()))
        }
    }

    struct Fixture {
        engine: LifecycleEngine,
        store: Arc<MemoryDeclarationStore>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryDeclarationStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let engine = LifecycleEngine::new(store.clone(), notifier.clone());
        Fixture {
            engine,
            store,
            notifier,
        }
    }

    fn teacher(id: &str) -> Actor {
        Actor::new(id, Role::Teacher)
    }

    fn registrar() -> Actor {
        Actor::new("reg-1", Role::Registrar)
    }

    fn chief(dept: &str) -> Actor {
        Actor::with_department("chief-1", Role::DepartmentChief, dept)
    }

    fn director() -> Actor {
        Actor::new("dir-1", Role::StudiesDirector)
    }

    fn new_declaration(dept: &str, cm: f64, td: f64, tp: f64) -> NewDeclaration {
        NewDeclaration {
            department_id: dept.into(),
            course_element_id: "ce-1".into(),
            declaration_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            cm_hours: cm,
            td_hours: td,
            tp_hours: tp,
        }
    }

    fn reject(reason: &str) -> Decision {
        Decision::Reject {
            reason: reason.into(),
        }
    }

    #[tokio::test]
    async fn test_create_initializes_draft() {
        let f = fixture();
        let doc = f
            .engine
            .create(&teacher("t-1"), new_declaration("d-1", 2.0, 1.0, 0.0))
            .await
            .unwrap();

        assert_eq!(doc.status, Status::Draft);
        assert_eq!(doc.teacher_id, "t-1");
        assert_eq!(doc.total_hours, 3.0);
        assert_eq!(doc.payment_status, crate::db::schemas::PaymentStatus::Unpaid);
        // No notification for create
        assert!(f.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_negative_hours() {
        let f = fixture();
        let err = f
            .engine
            .create(&teacher("t-1"), new_declaration("d-1", -1.0, 0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Validation(_)));
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_teacher_role() {
        let f = fixture();
        let err = f
            .engine
            .create(&registrar(), new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_recomputes_total_and_bumps_updated_at() {
        let f = fixture();
        let doc = f
            .engine
            .create(&teacher("t-1"), new_declaration("d-1", 2.0, 1.0, 0.0))
            .await
            .unwrap();

        let updated = f
            .engine
            .update(
                &teacher("t-1"),
                &doc.declaration_id,
                DeclarationUpdate {
                    course_element_id: "ce-2".into(),
                    declaration_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
                    cm_hours: 1.0,
                    td_hours: 1.0,
                    tp_hours: 2.5,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.total_hours, 4.5);
        assert_eq!(updated.course_element_id, "ce-2");
        let stored = f.store.get(&doc.declaration_id).await.unwrap().unwrap();
        assert_eq!(stored.total_hours, 4.5);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_forbidden() {
        let f = fixture();
        let doc = f
            .engine
            .create(&teacher("t-1"), new_declaration("d-1", 2.0, 0.0, 0.0))
            .await
            .unwrap();

        let err = f
            .engine
            .update(
                &teacher("t-2"),
                &doc.declaration_id,
                DeclarationUpdate {
                    course_element_id: "ce-1".into(),
                    declaration_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
                    cm_hours: 9.0,
                    td_hours: 0.0,
                    tp_hours: 0.0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));

        let stored = f.store.get(&doc.declaration_id).await.unwrap().unwrap();
        assert_eq!(stored.cm_hours, 2.0);
    }

    #[tokio::test]
    async fn test_update_after_submit_forbidden() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 2.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();

        let err = f
            .engine
            .update(
                &owner,
                &doc.declaration_id,
                DeclarationUpdate {
                    course_element_id: "ce-1".into(),
                    declaration_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
                    cm_hours: 1.0,
                    td_hours: 0.0,
                    tp_hours: 0.0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_delete_draft_removes_record() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();

        f.engine.delete(&owner, &doc.declaration_id).await.unwrap();
        assert!(f.store.get(&doc.declaration_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_after_submit_forbidden() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();

        let err = f
            .engine
            .delete(&owner, &doc.declaration_id)
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));
        assert!(f.store.get(&doc.declaration_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_submit_by_non_owner_forbidden_and_record_unchanged() {
        let f = fixture();
        let doc = f
            .engine
            .create(&teacher("t-1"), new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();

        let err = f
            .engine
            .submit(&teacher("t-2"), &doc.declaration_id)
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));

        let stored = f.store.get(&doc.declaration_id).await.unwrap().unwrap();
        assert_eq!(stored.status, Status::Draft);
        assert!(f.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_verify_on_draft_invalid_state() {
        let f = fixture();
        let doc = f
            .engine
            .create(&teacher("t-1"), new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();

        let err = f
            .engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap_err();
        match err {
            HeuresError::InvalidState {
                current, expected, ..
            } => {
                assert_eq!(current, Status::Draft);
                assert_eq!(expected, Status::Submitted);
            }
            other => panic!("expected InvalidState, got {:?}", other),
        }

        let stored = f.store.get(&doc.declaration_id).await.unwrap().unwrap();
        assert_eq!(stored.status, Status::Draft);
        assert!(stored.verified_by.is_none());
    }

    #[tokio::test]
    async fn test_verify_by_wrong_role_forbidden() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();

        let err = f
            .engine
            .verify(&director(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_validate_department_scoped() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-b", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();
        f.engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();

        // Chief of department A cannot validate department B's declaration
        let err = f
            .engine
            .validate(&chief("d-a"), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap_err();
        assert!(matches!(err, HeuresError::Forbidden(_)));

        let stored = f.store.get(&doc.declaration_id).await.unwrap().unwrap();
        assert_eq!(stored.status, Status::Verified);

        // The matching chief succeeds
        let validated = f
            .engine
            .validate(&chief("d-b"), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();
        assert_eq!(validated.status, Status::Validated);
        assert_eq!(validated.validated_by.as_deref(), Some("chief-1"));
    }

    #[tokio::test]
    async fn test_reject_requires_non_empty_reason() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();

        for reason in ["", "   ", "\t\n"] {
            let err = f
                .engine
                .verify(&registrar(), &doc.declaration_id, reject(reason))
                .await
                .unwrap_err();
            assert!(matches!(err, HeuresError::Validation(_)));
        }

        // No partial mutation happened
        let stored = f.store.get(&doc.declaration_id).await.unwrap().unwrap();
        assert_eq!(stored.status, Status::Submitted);
        assert!(stored.rejected_by.is_none());
        assert!(stored.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_reject_records_reason_verbatim() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();

        let rejected = f
            .engine
            .verify(&registrar(), &doc.declaration_id, reject("incomplete data"))
            .await
            .unwrap();
        assert_eq!(rejected.status, Status::Rejected);
        assert_eq!(rejected.rejected_by.as_deref(), Some("reg-1"));
        assert_eq!(rejected.rejection_reason.as_deref(), Some("incomplete data"));
        assert!(rejected.rejected_at.is_some());
    }

    #[tokio::test]
    async fn test_double_verify_invalid_state() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();
        f.engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();

        let err = f
            .engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap_err();
        match err {
            HeuresError::InvalidState {
                current, expected, ..
            } => {
                assert_eq!(current, Status::Verified);
                assert_eq!(expected, Status::Submitted);
            }
            other => panic!("expected InvalidState, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_one_notification_per_transition() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();
        f.engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();

        let sent = f.notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].new_status, Status::Submitted);
        assert_eq!(sent[1].new_status, Status::Verified);
        assert_eq!(sent[1].actor_id, "reg-1");
    }

    #[tokio::test]
    async fn test_notifier_failure_does_not_fail_transition() {
        let store = Arc::new(MemoryDeclarationStore::new());
        let engine = LifecycleEngine::new(store.clone(), Arc::new(FailingNotifier));
        let owner = teacher("t-1");
        let doc = engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();

        let submitted = engine.submit(&owner, &doc.declaration_id).await.unwrap();
        assert_eq!(submitted.status, Status::Submitted);
        assert_eq!(
            store.get(&doc.declaration_id).await.unwrap().unwrap().status,
            Status::Submitted
        );
    }

    #[tokio::test]
    async fn test_total_invariant_holds_through_chain() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 2.0, 1.5, 0.5))
            .await
            .unwrap();

        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();
        f.engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();
        f.engine
            .validate(&chief("d-1"), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();
        let approved = f
            .engine
            .approve(&director(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();

        assert_eq!(
            approved.total_hours,
            approved.cm_hours + approved.td_hours + approved.tp_hours
        );
        assert_eq!(approved.total_hours, 4.0);
    }

    #[tokio::test]
    async fn test_earlier_stamps_survive_later_rejection() {
        let f = fixture();
        let owner = teacher("t-1");
        let doc = f
            .engine
            .create(&owner, new_declaration("d-1", 1.0, 0.0, 0.0))
            .await
            .unwrap();
        f.engine.submit(&owner, &doc.declaration_id).await.unwrap();
        f.engine
            .verify(&registrar(), &doc.declaration_id, Decision::Accept)
            .await
            .unwrap();

        let rejected = f
            .engine
            .validate(&chief("d-1"), &doc.declaration_id, reject("wrong course"))
            .await
            .unwrap();
        assert_eq!(rejected.status, Status::Rejected);
        // The registrar's accept stamp is history and stays
        assert_eq!(rejected.verified_by.as_deref(), Some("reg-1"));
        assert!(rejected.validated_by.is_none());
        assert_eq!(rejected.rejected_by.as_deref(), Some("chief-1"));
    }
}
