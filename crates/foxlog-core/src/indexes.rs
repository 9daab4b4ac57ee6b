//! Index plan for `error_logs`.
//!
//! Indexes:
//! - `idx_userName` `{ userName: 1 }`
//! - `idx_moduleName` `{ moduleName: 1 }`
//! - `idx_createdTime` `{ createdTime: -1 }`
//! - `idx_exceptionType` `{ exceptionType: 1 }`
//! - `idx_moduleName_createdTime` `{ moduleName: 1, createdTime: -1 }`
//! - `idx_userName_createdTime` `{ userName: 1, createdTime: -1 }`
//! - `idx_ttl_createdTime` `{ createdTime: 1 }`, expiring, only when TTL is enabled

use bson::Document;

/// Default retention for the optional TTL index: 90 days.
pub const DEFAULT_TTL_SECONDS: u64 = 7_776_000;

pub const TTL_INDEX_NAME: &str = "idx_ttl_createdTime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Key-pattern value: `1` or `-1`.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexKey {
    pub field: &'static str,
    pub order: SortOrder,
}

impl IndexKey {
    #[must_use]
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            order: SortOrder::Ascending,
        }
    }

    #[must_use]
    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }
}

/// A named index definition. Every index is requested as a background build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub keys: Vec<IndexKey>,
    pub expire_after_secs: Option<u64>,
}

impl IndexSpec {
    #[must_use]
    pub fn new(name: &'static str, keys: impl Into<Vec<IndexKey>>) -> Self {
        Self {
            name,
            keys: keys.into(),
            expire_after_secs: None,
        }
    }

    #[must_use]
    pub const fn expire_after(mut self, seconds: u64) -> Self {
        self.expire_after_secs = Some(seconds);
        self
    }

    /// Ordered key pattern, e.g. `{ moduleName: 1, createdTime: -1 }`.
    #[must_use]
    pub fn keys_document(&self) -> Document {
        let mut keys = Document::new();
        for key in &self.keys {
            keys.insert(key.field, key.order.direction());
        }
        keys
    }

    #[must_use]
    pub const fn is_ttl(&self) -> bool {
        self.expire_after_secs.is_some()
    }
}

/// The six secondary indexes every bootstrap creates.
#[must_use]
pub fn standard_indexes() -> Vec<IndexSpec> {
    vec![
        IndexSpec::new("idx_userName", [IndexKey::asc("userName")]),
        IndexSpec::new("idx_moduleName", [IndexKey::asc("moduleName")]),
        IndexSpec::new("idx_createdTime", [IndexKey::desc("createdTime")]),
        IndexSpec::new("idx_exceptionType", [IndexKey::asc("exceptionType")]),
        IndexSpec::new(
            "idx_moduleName_createdTime",
            [IndexKey::asc("moduleName"), IndexKey::desc("createdTime")],
        ),
        IndexSpec::new(
            "idx_userName_createdTime",
            [IndexKey::asc("userName"), IndexKey::desc("createdTime")],
        ),
    ]
}

/// Expiration index deleting records once `createdTime` is `seconds` old.
#[must_use]
pub fn ttl_index(seconds: u64) -> IndexSpec {
    IndexSpec::new(TTL_INDEX_NAME, [IndexKey::asc("createdTime")]).expire_after(seconds)
}

/// Full index plan, in creation order.
#[must_use]
pub fn index_plan(ttl_seconds: Option<u64>) -> Vec<IndexSpec> {
    let mut plan = standard_indexes();
    if let Some(seconds) = ttl_seconds {
        plan.push(ttl_index(seconds));
    }
    plan
}
