//! MongoDB declaration store
//!
//! Conditional writes are expressed as filter-qualified replace/delete: the
//! filter carries both the declaration id and the expected status, so a
//! concurrent transition that already moved the record makes the write a
//! no-op instead of a lost update.

use async_trait::async_trait;
use bson::{doc, Document};

use crate::db::schemas::{DeclarationDoc, Status, DECLARATION_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::lifecycle::Gate;
use crate::store::DeclarationStore;
use crate::types::Result;

/// Declaration store backed by MongoDB
pub struct MongoDeclarationStore {
    collection: MongoCollection<DeclarationDoc>,
}

impl MongoDeclarationStore {
    /// Open the declarations collection and apply its indexes
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        let collection = mongo
            .collection::<DeclarationDoc>(DECLARATION_COLLECTION)
            .await?;
        Ok(Self { collection })
    }
}

#[async_trait]
impl DeclarationStore for MongoDeclarationStore {
    async fn insert(&self, doc: &DeclarationDoc) -> Result<()> {
        self.collection.insert_one(doc).await
    }

    async fn get(&self, declaration_id: &str) -> Result<Option<DeclarationDoc>> {
        self.collection
            .find_one(doc! { "declaration_id": declaration_id })
            .await
    }

    async fn replace_if_status(
        &self,
        declaration_id: &str,
        expected: Status,
        doc: &DeclarationDoc,
    ) -> Result<bool> {
        let result = self
            .collection
            .replace_one(
                doc! {
                    "declaration_id": declaration_id,
                    "status": expected.as_str(),
                },
                doc,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_if_status(&self, declaration_id: &str, expected: Status) -> Result<bool> {
        let result = self
            .collection
            .delete_one(doc! {
                "declaration_id": declaration_id,
                "status": expected.as_str(),
            })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_by_status(&self, status: Status) -> Result<Vec<DeclarationDoc>> {
        self.collection
            .find_many(doc! { "status": status.as_str() })
            .await
    }

    async fn find_by_teacher(&self, teacher_id: &str) -> Result<Vec<DeclarationDoc>> {
        self.collection
            .find_many(doc! { "teacher_id": teacher_id })
            .await
    }

    async fn find_by_teacher_and_status(
        &self,
        teacher_id: &str,
        status: Status,
    ) -> Result<Vec<DeclarationDoc>> {
        self.collection
            .find_many(doc! { "teacher_id": teacher_id, "status": status.as_str() })
            .await
    }

    async fn find_by_department_and_status(
        &self,
        department_id: &str,
        status: Status,
    ) -> Result<Vec<DeclarationDoc>> {
        self.collection
            .find_many(doc! { "department_id": department_id, "status": status.as_str() })
            .await
    }

    async fn find_stamped_by(&self, gate: Gate, actor_id: &str) -> Result<Vec<DeclarationDoc>> {
        let mut filter = Document::new();
        filter.insert(gate.stamp_field(), actor_id);
        self.collection.find_many(filter).await
    }

    async fn find_rejected_by(&self, actor_id: &str) -> Result<Vec<DeclarationDoc>> {
        self.collection
            .find_many(doc! { "rejected_by": actor_id })
            .await
    }
}
