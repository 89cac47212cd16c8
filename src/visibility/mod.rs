//! Per-role worklist resolver
//!
//! Computes, for a given actor, which declarations are waiting on them and
//! which they have already acted on. Stateless: every call reads fresh from
//! the store and guarantees set membership only - callers order for display.

use std::collections::HashSet;
use std::sync::Arc;

use crate::auth::{Actor, Role};
use crate::db::schemas::{DeclarationDoc, Status};
use crate::lifecycle::Gate;
use crate::store::DeclarationStore;
use crate::types::Result;

/// Resolver for pending / processed worklists
pub struct VisibilityResolver {
    store: Arc<dyn DeclarationStore>,
}

impl VisibilityResolver {
    pub fn new(store: Arc<dyn DeclarationStore>) -> Self {
        Self { store }
    }

    /// Declarations currently waiting on this actor
    ///
    /// Reviewers see the queue of their gate (department-scoped for chiefs),
    /// teachers see their own drafts, every other role sees nothing here.
    pub async fn pending_for(&self, actor: &Actor) -> Result<Vec<DeclarationDoc>> {
        match actor.role {
            Role::Registrar => self.store.find_by_status(Status::Submitted).await,
            Role::DepartmentChief => match actor.department_id.as_deref() {
                Some(dept) => {
                    self.store
                        .find_by_department_and_status(dept, Status::Verified)
                        .await
                }
                // A chief without a department has no queue
                None => Ok(Vec::new()),
            },
            Role::StudiesDirector => self.store.find_by_status(Status::Validated).await,
            Role::Teacher => {
                self.store
                    .find_by_teacher_and_status(&actor.id, Status::Draft)
                    .await
            }
            Role::Admin => Ok(Vec::new()),
        }
    }

    /// Declarations this actor has already acted on, accept or reject
    ///
    /// Accepts are found through the actor's gate stamp, which persists even
    /// after a later gate moves the declaration on or rejects it. Rejections
    /// carry no gate stamp, so they are matched on `rejected_by`.
    pub async fn processed_by(&self, actor: &Actor) -> Result<Vec<DeclarationDoc>> {
        let gate = match actor.role {
            Role::Registrar => Gate::Verify,
            Role::DepartmentChief => Gate::Validate,
            Role::StudiesDirector => Gate::Approve,
            Role::Teacher => {
                // A teacher "processed" a declaration by submitting it
                let mine = self.store.find_by_teacher(&actor.id).await?;
                return Ok(mine
                    .into_iter()
                    .filter(|d| d.status != Status::Draft)
                    .collect());
            }
            Role::Admin => return Ok(Vec::new()),
        };

        let accepted = self.store.find_stamped_by(gate, &actor.id).await?;
        let rejected = self.store.find_rejected_by(&actor.id).await?;
        Ok(merge_by_id(accepted, rejected))
    }
}

/// Union of two result sets, deduplicated on declaration id
fn merge_by_id(
    first: Vec<DeclarationDoc>,
    second: Vec<DeclarationDoc>,
) -> Vec<DeclarationDoc> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(first.len() + second.len());
    for doc in first.into_iter().chain(second) {
        if seen.insert(doc.declaration_id.clone()) {
            merged.push(doc);
        }
    }
    merged
}
