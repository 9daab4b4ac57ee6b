//! The bootstrap sequence: drop → collection + validator → indexes → seed → report.
//!
//! Every step is idempotent, so a partially failed run is recovered by simply
//! running again. There is no rollback.

use chrono::Utc;
use foxlog_config::BootstrapConfig;
use foxlog_core::indexes::index_plan;
use foxlog_core::validation::check_document;
use foxlog_core::{CollectionValidator, ErrorLogRecord, IndexSpec};

use crate::error::DatabaseError;
use crate::report::{BootstrapReport, Step, StepEvent, StepOutcome};
use crate::target::SchemaTarget;

/// Static switches for one run. Nothing in the sequence branches on data
/// read from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub collection: String,
    pub seed_test_record: bool,
    /// Expiration in seconds for the TTL index; `None` leaves it out.
    pub ttl_seconds: Option<u64>,
    pub drop_existing: bool,
}

impl From<&BootstrapConfig> for BootstrapOptions {
    fn from(config: &BootstrapConfig) -> Self {
        Self {
            collection: config.collection.clone(),
            seed_test_record: config.seed_test_record,
            ttl_seconds: config.ttl(),
            drop_existing: config.drop_existing,
        }
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::from(&BootstrapConfig::default())
    }
}

/// Provisions the error-log collection on a `SchemaTarget`.
pub struct Bootstrapper<'a, T> {
    target: &'a T,
    options: BootstrapOptions,
    validator: CollectionValidator,
    indexes: Vec<IndexSpec>,
}

impl<'a, T: SchemaTarget> Bootstrapper<'a, T> {
    #[must_use]
    pub fn new(target: &'a T, options: BootstrapOptions) -> Self {
        let indexes = index_plan(options.ttl_seconds);
        Self {
            target,
            options,
            validator: CollectionValidator::error_logs(),
            indexes,
        }
    }

    /// Run the full sequence without progress callbacks.
    ///
    /// # Errors
    ///
    /// See [`Self::run_with_progress`].
    pub async fn run(&self) -> Result<BootstrapReport, DatabaseError> {
        self.run_with_progress(|_| {}).await
    }

    /// Run the full sequence, calling `on_step` as each step completes.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError` from the collection, validator or
    /// index steps, or from the final listing. A failed seed insert is not
    /// an error; it is recorded as `StepOutcome::Failed` in the report.
    pub async fn run_with_progress<F>(&self, mut on_step: F) -> Result<BootstrapReport, DatabaseError>
    where
        F: FnMut(&StepEvent),
    {
        let collection = self.options.collection.as_str();
        let mut steps = Vec::new();
        let mut record = |step: Step, outcome: StepOutcome| {
            let event = StepEvent { step, outcome };
            tracing::info!(step = %event.step, outcome = %event.outcome, "bootstrap step");
            on_step(&event);
            steps.push(event);
        };

        if self.options.drop_existing {
            let outcome = self.target.drop_collection(collection).await?;
            record(Step::DropCollection(collection.to_string()), outcome);
        }

        let created = self
            .target
            .create_collection(collection, &self.validator)
            .await?;
        let reaffirm = created == StepOutcome::AlreadyExists;
        record(Step::CreateCollection(collection.to_string()), created);

        if reaffirm {
            let outcome = self
                .target
                .apply_validator(collection, &self.validator)
                .await?;
            record(Step::ApplyValidator(collection.to_string()), outcome);
        }

        for spec in &self.indexes {
            let outcome = self.target.create_index(collection, spec).await?;
            record(Step::CreateIndex(spec.name.to_string()), outcome);
        }

        if self.options.seed_test_record {
            let outcome = self.seed(collection).await;
            record(Step::SeedRecord, outcome);
        }

        let collections = self.target.list_collection_names().await?;
        let indexes = self.target.list_indexes(collection).await?;

        let report = BootstrapReport {
            database: self.target.database_name().to_string(),
            collection: collection.to_string(),
            ttl_enabled: self.options.ttl_seconds.is_some(),
            steps,
            collections,
            indexes,
        };
        if let Some(stale) = report.stale_ttl_index() {
            tracing::warn!(
                index = %stale.name,
                "expiration index from an earlier run is still active; drop it to stop expiry"
            );
        }
        Ok(report)
    }

    /// Insert the placeholder record unless one is already there.
    ///
    /// Never fails: schema and indexes are already in place at this point,
    /// so problems are reported and the run carries on.
    async fn seed(&self, collection: &str) -> StepOutcome {
        match self.try_seed(collection).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(%error, "seed record insert failed");
                StepOutcome::Failed(error.to_string())
            }
        }
    }

    async fn try_seed(&self, collection: &str) -> Result<StepOutcome, DatabaseError> {
        let existing = self
            .target
            .count_documents(collection, ErrorLogRecord::seed_filter())
            .await?;
        if existing > 0 {
            return Ok(StepOutcome::AlreadyExists);
        }

        let document = ErrorLogRecord::seed(Utc::now()).to_document()?;
        for violation in check_document(&document) {
            tracing::warn!(%violation, "seed record does not match the collection validator");
        }

        let id = self.target.insert_document(collection, document).await?;
        Ok(StepOutcome::Inserted(id))
    }
}
