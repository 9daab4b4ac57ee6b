//! Outcome types produced by a bootstrap run.

use std::fmt;
use std::time::Duration;

use bson::Document;
use foxlog_core::indexes::TTL_INDEX_NAME;

/// One administrative call in the bootstrap sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    DropCollection(String),
    CreateCollection(String),
    ApplyValidator(String),
    CreateIndex(String),
    SeedRecord,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropCollection(name) => write!(f, "drop collection {name}"),
            Self::CreateCollection(name) => write!(f, "collection {name}"),
            Self::ApplyValidator(name) => write!(f, "validator on {name}"),
            Self::CreateIndex(name) => write!(f, "index {name}"),
            Self::SeedRecord => f.write_str("seed record"),
        }
    }
}

/// What a step did. `Failed` (seed only) and `Conflict` (indexes only) are
/// warnings: the step did not take effect but the run carried on. Every other
/// failure aborts the run as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Created,
    AlreadyExists,
    Updated,
    Dropped,
    /// Nothing to do (disabled, or target absent).
    Skipped,
    /// Document inserted; carries the generated id.
    Inserted(String),
    Failed(String),
    /// An index with the same key or name but another definition is in the
    /// way, so the requested index was not created.
    Conflict(String),
}

impl StepOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Conflict(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::AlreadyExists => f.write_str("already exists"),
            Self::Updated => f.write_str("updated"),
            Self::Dropped => f.write_str("dropped"),
            Self::Skipped => f.write_str("skipped"),
            Self::Inserted(id) => write!(f, "inserted ({id})"),
            Self::Failed(message) => write!(f, "failed: {message}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// An index as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSummary {
    pub name: String,
    pub keys: Document,
    pub expire_after_secs: Option<u64>,
}

impl IndexSummary {
    #[must_use]
    pub fn new(name: impl Into<String>, keys: Document, expire_after: Option<Duration>) -> Self {
        Self {
            name: name.into(),
            keys,
            expire_after_secs: expire_after.map(|d| d.as_secs()),
        }
    }

    /// Key pattern as relaxed extended JSON, e.g. `{"moduleName":1,"createdTime":-1}`.
    #[must_use]
    pub fn keys_json(&self) -> String {
        let fields: Vec<String> = self
            .keys
            .iter()
            .map(|(field, direction)| {
                format!(
                    "{}:{}",
                    serde_json::Value::String(field.clone()),
                    direction.clone().into_relaxed_extjson()
                )
            })
            .collect();
        format!("{{{}}}", fields.join(","))
    }

    /// The automatic `_id_` index every collection carries.
    #[must_use]
    pub fn is_default_id_index(&self) -> bool {
        self.name == "_id_"
    }
}

/// Everything a bootstrap run did, plus the state it left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    pub database: String,
    pub collection: String,
    /// Whether this run requested the expiration index.
    pub ttl_enabled: bool,
    pub steps: Vec<StepEvent>,
    /// Collection names in `database` after the run.
    pub collections: Vec<String>,
    /// Indexes on `collection` after the run, `_id_` included.
    pub indexes: Vec<IndexSummary>,
}

impl BootstrapReport {
    /// Outcome of the seed step, if it ran.
    #[must_use]
    pub fn seed_outcome(&self) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|event| event.step == Step::SeedRecord)
            .map(|event| &event.outcome)
    }

    /// Secondary indexes, i.e. everything except `_id_`.
    pub fn secondary_indexes(&self) -> impl Iterator<Item = &IndexSummary> {
        self.indexes.iter().filter(|index| !index.is_default_id_index())
    }

    /// An expiration index left by an earlier run when this run did not ask
    /// for one. Bootstrapping never drops indexes, so it keeps expiring logs.
    #[must_use]
    pub fn stale_ttl_index(&self) -> Option<&IndexSummary> {
        if self.ttl_enabled {
            return None;
        }
        self.indexes.iter().find(|index| index.name == TTL_INDEX_NAME)
    }

    /// Steps that did not take effect, without aborting the run.
    pub fn failures(&self) -> impl Iterator<Item = &StepEvent> {
        self.steps.iter().filter(|event| event.outcome.is_failure())
    }
}
