//! Settings for the bootstrap sequence itself.

use foxlog_core::indexes::DEFAULT_TTL_SECONDS;
use foxlog_core::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
use serde::{Deserialize, Serialize};

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

const fn default_seed_test_record() -> bool {
    true
}

const fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    /// Insert one placeholder record after the indexes are in place.
    #[serde(default = "default_seed_test_record")]
    pub seed_test_record: bool,

    /// Create the expiration index on `createdTime`.
    #[serde(default)]
    pub enable_ttl: bool,

    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Drop the collection before recreating it. Destroys all stored logs.
    #[serde(default)]
    pub drop_existing: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            collection: default_collection(),
            seed_test_record: default_seed_test_record(),
            enable_ttl: false,
            ttl_seconds: default_ttl_seconds(),
            drop_existing: false,
        }
    }
}

impl BootstrapConfig {
    /// TTL in seconds when the expiration index is enabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<u64> {
        if self.enable_ttl {
            Some(self.ttl_seconds)
        } else {
            None
        }
    }
}
