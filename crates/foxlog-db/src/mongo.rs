//! `SchemaTarget` over a live MongoDB database.

use std::time::Duration;

use bson::{Bson, Document};
use foxlog_config::FoxlogConfig;
use foxlog_core::validator::{ValidationAction, ValidationLevel};
use foxlog_core::{CollectionValidator, IndexSpec};
use futures::TryStreamExt;
use mongodb::options::{self, IndexOptions};
use mongodb::{Collection, Database, IndexModel};

use crate::connect::connect;
use crate::error::{
    DatabaseError, is_index_conflict, is_namespace_exists, is_namespace_not_found,
};
use crate::report::{IndexSummary, StepOutcome};
use crate::target::SchemaTarget;

/// Database handle the bootstrapper provisions.
///
/// Built once by the caller and passed in explicitly; nothing here is global.
#[derive(Debug, Clone)]
pub struct MongoTarget {
    database: Database,
}

impl MongoTarget {
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect with `config.mongodb` and target `config.bootstrap.database`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` or `DatabaseError::Unauthorized` when
    /// the server cannot be used.
    pub async fn connect(config: &FoxlogConfig) -> Result<Self, DatabaseError> {
        let client = connect(&config.mongodb).await?;
        Ok(Self::new(client.database(&config.bootstrap.database)))
    }

    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

const fn driver_level(level: ValidationLevel) -> options::ValidationLevel {
    match level {
        ValidationLevel::Off => options::ValidationLevel::Off,
        ValidationLevel::Strict => options::ValidationLevel::Strict,
        ValidationLevel::Moderate => options::ValidationLevel::Moderate,
    }
}

const fn driver_action(action: ValidationAction) -> options::ValidationAction {
    match action {
        ValidationAction::Error => options::ValidationAction::Error,
        ValidationAction::Warn => options::ValidationAction::Warn,
    }
}

fn index_model(spec: &IndexSpec) -> IndexModel {
    let options = IndexOptions::builder()
        .name(spec.name.to_string())
        .background(true)
        .expire_after(spec.expire_after_secs.map(Duration::from_secs))
        .build();
    IndexModel::builder()
        .keys(spec.keys_document())
        .options(options)
        .build()
}

fn summarize(model: IndexModel) -> IndexSummary {
    let (name, expire_after) = model
        .options
        .map_or((String::new(), None), |options| {
            (options.name.unwrap_or_default(), options.expire_after)
        });
    IndexSummary::new(name, model.keys, expire_after)
}

fn id_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

impl SchemaTarget for MongoTarget {
    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn drop_collection(&self, collection: &str) -> Result<StepOutcome, DatabaseError> {
        if !self.list_collection_names().await?.iter().any(|n| n == collection) {
            return Ok(StepOutcome::Skipped);
        }
        self.collection(collection)
            .drop()
            .await
            .map_err(|e| DatabaseError::from_step(format!("drop collection {collection}"), e))?;
        Ok(StepOutcome::Dropped)
    }

    async fn create_collection(
        &self,
        collection: &str,
        validator: &CollectionValidator,
    ) -> Result<StepOutcome, DatabaseError> {
        let result = self
            .database
            .create_collection(collection)
            .validator(validator.validator_document())
            .validation_level(driver_level(validator.level))
            .validation_action(driver_action(validator.action))
            .await;
        match result {
            Ok(()) => Ok(StepOutcome::Created),
            Err(error) if is_namespace_exists(&error) => Ok(StepOutcome::AlreadyExists),
            Err(error) => Err(DatabaseError::from_step(
                format!("create collection {collection}"),
                error,
            )),
        }
    }

    async fn apply_validator(
        &self,
        collection: &str,
        validator: &CollectionValidator,
    ) -> Result<StepOutcome, DatabaseError> {
        self.database
            .run_command(validator.coll_mod_command(collection))
            .await
            .map_err(|e| DatabaseError::from_step(format!("collMod {collection}"), e))?;
        Ok(StepOutcome::Updated)
    }

    async fn create_index(
        &self,
        collection: &str,
        spec: &IndexSpec,
    ) -> Result<StepOutcome, DatabaseError> {
        let existed = self
            .list_indexes(collection)
            .await?
            .iter()
            .any(|index| index.name == spec.name);

        match self.collection(collection).create_index(index_model(spec)).await {
            Ok(_) if existed => Ok(StepOutcome::AlreadyExists),
            Ok(_) => Ok(StepOutcome::Created),
            Err(error) if is_index_conflict(&error) => {
                tracing::warn!(
                    index = spec.name,
                    %error,
                    "conflicting index is in the way; requested index not created"
                );
                Ok(StepOutcome::Conflict(error.to_string()))
            }
            Err(error) => Err(DatabaseError::from_step(
                format!("create index {}", spec.name),
                error,
            )),
        }
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, DatabaseError> {
        let mut names = self
            .database
            .list_collection_names()
            .await
            .map_err(|e| DatabaseError::from_step("list collections", e))?;
        names.sort();
        Ok(names)
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexSummary>, DatabaseError> {
        let cursor = match self.collection(collection).list_indexes().await {
            Ok(cursor) => cursor,
            Err(error) if is_namespace_not_found(&error) => return Ok(Vec::new()),
            Err(error) => {
                return Err(DatabaseError::from_step(
                    format!("list indexes on {collection}"),
                    error,
                ));
            }
        };
        let models: Vec<IndexModel> = cursor
            .try_collect()
            .await
            .map_err(|e| DatabaseError::from_step(format!("list indexes on {collection}"), e))?;
        Ok(models.into_iter().map(summarize).collect())
    }

    async fn count_documents(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<u64, DatabaseError> {
        self.collection(collection)
            .count_documents(filter)
            .await
            .map_err(|e| DatabaseError::from_step(format!("count documents in {collection}"), e))
    }

    async fn insert_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, DatabaseError> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| DatabaseError::from_step(format!("insert into {collection}"), e))?;
        Ok(id_string(result.inserted_id))
    }
}
