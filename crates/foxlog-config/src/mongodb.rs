//! MongoDB connection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_app_name() -> String {
    "foxlog".to_string()
}

/// Default connect and server-selection timeout in seconds.
const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_connect_attempts() -> u32 {
    3
}

const fn default_retry_base_delay_ms() -> u64 {
    500
}

const fn default_retry_max_delay_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MongoConfig {
    /// Connection string, credentials included when the server needs them.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Name reported to the server in the connection handshake.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Attempts for the initial ping, the first one included.
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,

    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            app_name: default_app_name(),
            connect_timeout_secs: default_connect_timeout_secs(),
            connect_attempts: default_connect_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl MongoConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    #[must_use]
    pub const fn retry_max_delay(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }

    /// URI with any `user:password@` section masked, safe for logs.
    #[must_use]
    pub fn redacted_uri(&self) -> String {
        let Some((scheme, rest)) = self.uri.split_once("://") else {
            return self.uri.clone();
        };
        let authority_end = rest.find('/').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
            None => self.uri.clone(),
        }
    }
}
