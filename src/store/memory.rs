//! In-memory declaration store
//!
//! DashMap-backed implementation with the same conditional-write semantics
//! as the MongoDB store. Backs this crate's tests and works as a test double
//! for embedders.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::db::schemas::{DeclarationDoc, Status};
use crate::lifecycle::Gate;
use crate::store::DeclarationStore;
use crate::types::Result;

/// Concurrent in-memory store keyed by declaration id
#[derive(Default)]
pub struct MemoryDeclarationStore {
    records: DashMap<String, DeclarationDoc>,
}

impl MemoryDeclarationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored declarations
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn filter<F>(&self, predicate: F) -> Vec<DeclarationDoc>
    where
        F: Fn(&DeclarationDoc) -> bool,
    {
        self.records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl DeclarationStore for MemoryDeclarationStore {
    async fn insert(&self, doc: &DeclarationDoc) -> Result<()> {
        self.records
            .insert(doc.declaration_id.clone(), doc.clone());
        Ok(())
    }

    async fn get(&self, declaration_id: &str) -> Result<Option<DeclarationDoc>> {
        Ok(self.records.get(declaration_id).map(|e| e.value().clone()))
    }

    async fn replace_if_status(
        &self,
        declaration_id: &str,
        expected: Status,
        doc: &DeclarationDoc,
    ) -> Result<bool> {
        // Entry lock makes the check-and-swap atomic
        match self.records.get_mut(declaration_id) {
            Some(mut entry) if entry.status == expected => {
                *entry = doc.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_status(&self, declaration_id: &str, expected: Status) -> Result<bool> {
        Ok(self
            .records
            .remove_if(declaration_id, |_, doc| doc.status == expected)
            .is_some())
    }

    async fn find_by_status(&self, status: Status) -> Result<Vec<DeclarationDoc>> {
        Ok(self.filter(|d| d.status == status))
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> Result<Vec<DeclarationDoc>> {
        Ok(self.filter(|d| d.teacher_id == teacher_id))
    }

    async fn find_by_teacher_and_status(
        &self,
        teacher_id: &str,
        status: Status,
    ) -> Result<Vec<DeclarationDoc>> {
        Ok(self.filter(|d| d.teacher_id == teacher_id && d.status == status))
    }

    async fn find_by_department_and_status(
        &self,
        department_id: &str,
        status: Status,
    ) -> Result<Vec<DeclarationDoc>> {
        Ok(self.filter(|d| d.department_id == department_id && d.status == status))
    }

    async fn find_stamped_by(&self, gate: Gate, actor_id: &str) -> Result<Vec<DeclarationDoc>> {
        Ok(self.filter(|d| gate.stamped_actor(d) == Some(actor_id)))
    }

    async fn find_rejected_by(&self, actor_id: &str) -> Result<Vec<DeclarationDoc>> {
        Ok(self.filter(|d| d.rejected_by.as_deref() == Some(actor_id)))
    }
}
