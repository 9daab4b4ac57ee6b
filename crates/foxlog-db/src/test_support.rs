//! In-memory `SchemaTarget` for bootstrap tests.
//!
//! Mirrors the server behavior the bootstrapper relies on: `_id_` on every
//! new collection, "already exists" for repeated collection and index
//! creation, index conflicts, and warn-level validation that counts bad
//! writes but keeps them.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use foxlog_core::validation::check_document;
use foxlog_core::{CollectionValidator, IndexSpec};
use mongodb::error::{CommandError, Error as MongoError, ErrorKind};

use crate::error::{DatabaseError, NAMESPACE_NOT_FOUND};
use crate::report::{IndexSummary, StepOutcome};
use crate::target::SchemaTarget;

#[derive(Debug, Default)]
struct MemoryCollection {
    validator: Option<CollectionValidator>,
    indexes: Vec<IndexSummary>,
    documents: Vec<Document>,
    flagged_writes: usize,
}

impl MemoryCollection {
    fn with_validator(validator: &CollectionValidator) -> Self {
        Self {
            validator: Some(validator.clone()),
            indexes: vec![IndexSummary::new("_id_", doc! { "_id": 1 }, None)],
            ..Self::default()
        }
    }
}

/// Build the driver error a server command failure with `code` produces.
pub fn command_error(code: i32, code_name: &str, message: &str) -> MongoError {
    let command: CommandError = bson::from_document(doc! {
        "code": code,
        "codeName": code_name,
        "errmsg": message,
    })
    .unwrap();
    MongoError::from(ErrorKind::Command(command))
}

/// Schema calls `MemoryTarget` can be told to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCall {
    CreateCollection,
    ApplyValidator,
    CreateIndex,
}

pub struct MemoryTarget {
    database: String,
    collections: Mutex<BTreeMap<String, MemoryCollection>>,
    fail_inserts: bool,
    rejected: Option<(SchemaCall, i32)>,
}

impl MemoryTarget {
    pub fn new(database: &str) -> Self {
        Self {
            database: database.to_string(),
            collections: Mutex::new(BTreeMap::new()),
            fail_inserts: false,
            rejected: None,
        }
    }

    /// Fail every `call` with server error `code`.
    pub const fn rejecting(mut self, call: SchemaCall, code: i32) -> Self {
        self.rejected = Some((call, code));
        self
    }

    fn check_rejected(&self, call: SchemaCall, step: String) -> Result<(), DatabaseError> {
        match self.rejected {
            Some((rejected, code)) if rejected == call => Err(DatabaseError::from_step(
                step,
                command_error(code, "Rejected", "rejected by test server"),
            )),
            _ => Ok(()),
        }
    }

    /// Reject every insert as if the user lacked the `insert` privilege.
    pub const fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, MemoryCollection>> {
        self.collections.lock().unwrap()
    }

    pub fn validator(&self, collection: &str) -> Option<CollectionValidator> {
        self.lock()
            .get(collection)
            .and_then(|c| c.validator.clone())
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.lock().get(collection).map_or(0, |c| c.documents.len())
    }

    pub fn flagged_writes(&self, collection: &str) -> usize {
        self.lock().get(collection).map_or(0, |c| c.flagged_writes)
    }

    /// Documents whose fields equal every field of `filter`.
    pub fn count_matching(&self, collection: &str, filter: &Document) -> usize {
        self.lock().get(collection).map_or(0, |c| {
            c.documents
                .iter()
                .filter(|d| matches_filter(d, filter))
                .count()
        })
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

impl SchemaTarget for MemoryTarget {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn drop_collection(&self, collection: &str) -> Result<StepOutcome, DatabaseError> {
        Ok(match self.lock().remove(collection) {
            Some(_) => StepOutcome::Dropped,
            None => StepOutcome::Skipped,
        })
    }

    async fn create_collection(
        &self,
        collection: &str,
        validator: &CollectionValidator,
    ) -> Result<StepOutcome, DatabaseError> {
        self.check_rejected(
            SchemaCall::CreateCollection,
            format!("create collection {collection}"),
        )?;
        let mut collections = self.lock();
        if collections.contains_key(collection) {
            return Ok(StepOutcome::AlreadyExists);
        }
        collections.insert(
            collection.to_string(),
            MemoryCollection::with_validator(validator),
        );
        Ok(StepOutcome::Created)
    }

    async fn apply_validator(
        &self,
        collection: &str,
        validator: &CollectionValidator,
    ) -> Result<StepOutcome, DatabaseError> {
        let step = format!("collMod {collection}");
        self.check_rejected(SchemaCall::ApplyValidator, step.clone())?;
        let mut collections = self.lock();
        let target = collections.get_mut(collection).ok_or_else(|| {
            DatabaseError::from_step(
                step,
                command_error(NAMESPACE_NOT_FOUND, "NamespaceNotFound", "ns does not exist"),
            )
        })?;
        target.validator = Some(validator.clone());
        Ok(StepOutcome::Updated)
    }

    async fn create_index(
        &self,
        collection: &str,
        spec: &IndexSpec,
    ) -> Result<StepOutcome, DatabaseError> {
        self.check_rejected(SchemaCall::CreateIndex, format!("create index {}", spec.name))?;
        let keys = spec.keys_document();
        let mut collections = self.lock();
        let target = collections.entry(collection.to_string()).or_default();
        if let Some(existing) = target.indexes.iter().find(|index| index.name == spec.name) {
            return Ok(if existing.keys == keys {
                StepOutcome::AlreadyExists
            } else {
                StepOutcome::Conflict(format!(
                    "an index named {} exists with key {}",
                    existing.name,
                    existing.keys_json()
                ))
            });
        }
        if let Some(existing) = target.indexes.iter().find(|index| index.keys == keys) {
            return Ok(StepOutcome::Conflict(format!(
                "Index already exists with a different name: {}",
                existing.name
            )));
        }
        target.indexes.push(IndexSummary::new(
            spec.name,
            keys,
            spec.expire_after_secs.map(Duration::from_secs),
        ));
        Ok(StepOutcome::Created)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, DatabaseError> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexSummary>, DatabaseError> {
        Ok(self
            .lock()
            .get(collection)
            .map(|c| c.indexes.clone())
            .unwrap_or_default())
    }

    async fn count_documents(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<u64, DatabaseError> {
        Ok(self.count_matching(collection, &filter) as u64)
    }

    async fn insert_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, DatabaseError> {
        if self.fail_inserts {
            return Err(DatabaseError::Unauthorized {
                step: format!("insert into {collection}"),
                message: format!("not authorized on {} to execute command insert", self.database),
            });
        }

        let mut collections = self.lock();
        let target = collections.entry(collection.to_string()).or_default();
        if target.validator.is_some() && !check_document(&document).is_empty() {
            target.flagged_writes += 1;
        }

        let id = match document.get("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => {
                let oid = ObjectId::new();
                document.insert("_id", oid);
                oid.to_hex()
            }
        };
        target.documents.push(document);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validator_on_missing_collection_is_a_namespace_error() {
        let target = MemoryTarget::new("foxnas_logs");
        let error = target
            .apply_validator("error_logs", &CollectionValidator::error_logs())
            .await
            .unwrap_err();

        match error {
            DatabaseError::Command { step, source } => {
                assert_eq!(step, "collMod error_logs");
                assert!(crate::error::is_namespace_not_found(&source));
            }
            other => panic!("expected a command error, got {other:?}"),
        }
    }
}
