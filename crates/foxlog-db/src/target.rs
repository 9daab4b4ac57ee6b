//! The seam between the bootstrap sequence and the database.
//!
//! Each method is one administrative call. Implementations translate the
//! server's "already exists" conditions into `StepOutcome::AlreadyExists`
//! rather than errors, so the sequence in `bootstrap` stays linear.

use std::future::Future;

use bson::Document;
use foxlog_core::{CollectionValidator, IndexSpec};

use crate::error::DatabaseError;
use crate::report::{IndexSummary, StepOutcome};

pub trait SchemaTarget {
    /// Name of the database all calls act on.
    fn database_name(&self) -> &str;

    /// Drop `collection`. `Skipped` when it does not exist.
    fn drop_collection(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<StepOutcome, DatabaseError>> + Send;

    /// Create `collection` with `validator`. `AlreadyExists` when present.
    fn create_collection(
        &self,
        collection: &str,
        validator: &CollectionValidator,
    ) -> impl Future<Output = Result<StepOutcome, DatabaseError>> + Send;

    /// Replace the validator of an existing collection.
    fn apply_validator(
        &self,
        collection: &str,
        validator: &CollectionValidator,
    ) -> impl Future<Output = Result<StepOutcome, DatabaseError>> + Send;

    /// Request a background build of `spec`. `AlreadyExists` when an index
    /// with that name is already present.
    fn create_index(
        &self,
        collection: &str,
        spec: &IndexSpec,
    ) -> impl Future<Output = Result<StepOutcome, DatabaseError>> + Send;

    fn list_collection_names(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, DatabaseError>> + Send;

    fn list_indexes(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<IndexSummary>, DatabaseError>> + Send;

    fn count_documents(
        &self,
        collection: &str,
        filter: Document,
    ) -> impl Future<Output = Result<u64, DatabaseError>> + Send;

    /// Insert one document and return its id as a string.
    fn insert_document(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = Result<String, DatabaseError>> + Send;
}
