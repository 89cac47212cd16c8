//! Declaration persistence behind a trait
//!
//! The engine only ever talks to [`DeclarationStore`]. Every status-changing
//! write is conditional on the expected prior status, so two racing
//! transitions from the same stale snapshot cannot both land.

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::db::schemas::{DeclarationDoc, Status};
use crate::lifecycle::Gate;
use crate::types::Result;

pub use memory::MemoryDeclarationStore;
pub use mongo::MongoDeclarationStore;

/// Storage collaborator contract for declaration records
#[async_trait]
pub trait DeclarationStore: Send + Sync {
    /// Insert a new declaration
    async fn insert(&self, doc: &DeclarationDoc) -> Result<()>;

    /// Fetch a declaration by its public id
    async fn get(&self, declaration_id: &str) -> Result<Option<DeclarationDoc>>;

    /// Replace a declaration, conditional on its stored status
    ///
    /// Returns `false` when no record matched - either the record is gone or
    /// its status is no longer `expected`. The caller re-reads to tell the
    /// two apart.
    async fn replace_if_status(
        &self,
        declaration_id: &str,
        expected: Status,
        doc: &DeclarationDoc,
    ) -> Result<bool>;

    /// Remove a declaration, conditional on its stored status
    async fn delete_if_status(&self, declaration_id: &str, expected: Status) -> Result<bool>;

    /// All declarations in a given status
    async fn find_by_status(&self, status: Status) -> Result<Vec<DeclarationDoc>>;

    /// All declarations owned by a teacher
    async fn find_by_teacher(&self, teacher_id: &str) -> Result<Vec<DeclarationDoc>>;

    /// Declarations owned by a teacher in a given status
    async fn find_by_teacher_and_status(
        &self,
        teacher_id: &str,
        status: Status,
    ) -> Result<Vec<DeclarationDoc>>;

    /// Declarations of a department in a given status
    async fn find_by_department_and_status(
        &self,
        department_id: &str,
        status: Status,
    ) -> Result<Vec<DeclarationDoc>>;

    /// Declarations carrying a given actor's accept stamp at a gate
    async fn find_stamped_by(&self, gate: Gate, actor_id: &str) -> Result<Vec<DeclarationDoc>>;

    /// Declarations a given actor rejected
    async fn find_rejected_by(&self, actor_id: &str) -> Result<Vec<DeclarationDoc>>;
}
