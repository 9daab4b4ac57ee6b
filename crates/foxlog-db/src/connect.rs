//! Client construction and the initial reachability check.

use bson::doc;
use foxlog_config::MongoConfig;
use mongodb::Client;
use mongodb::options::ClientOptions;

use crate::error::{DatabaseError, is_unauthorized};
use crate::retry::{RetryConfig, is_transient_connect_error};

/// Build a client from `config` and wait until the server answers `ping`.
///
/// Transient failures are retried with exponential backoff. Bad connection
/// strings, authentication failures and exhausted retries are returned as
/// fatal errors.
///
/// # Errors
///
/// Returns `DatabaseError::Connect` or `DatabaseError::Unauthorized`.
pub async fn connect(config: &MongoConfig) -> Result<Client, DatabaseError> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| DatabaseError::Connect(format!("invalid connection string: {e}")))?;
    options.app_name = Some(config.app_name.clone());
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());

    let client = Client::with_options(options)
        .map_err(|e| DatabaseError::Connect(format!("client setup: {e}")))?;

    ping(&client, &RetryConfig::from(config), &config.redacted_uri()).await?;
    Ok(client)
}

async fn ping(client: &Client, retry: &RetryConfig, server: &str) -> Result<(), DatabaseError> {
    let mut attempt = 1;
    loop {
        match client.database("admin").run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                tracing::info!(server, attempt, "connected to MongoDB");
                return Ok(());
            }
            Err(error) if is_unauthorized(&error) => {
                return Err(DatabaseError::Unauthorized {
                    step: "connect".to_string(),
                    message: error.to_string(),
                });
            }
            Err(error) if is_transient_connect_error(&error) && retry.should_retry(attempt) => {
                let delay = retry.delay_after(attempt);
                tracing::debug!(%error, attempt, ?delay, "ping failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => {
                return Err(DatabaseError::Connect(format!(
                    "{server} unreachable after {attempt} attempt(s): {error}"
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[tokio::test]
    async fn unusable_connection_string_is_fatal() {
        let config = MongoConfig {
            uri: "mongodb://localhost:notaport".to_string(),
            ..MongoConfig::default()
        };
        let error = connect(&config).await.unwrap_err();
        assert!(matches!(error, DatabaseError::Connect(ref m) if m.starts_with("invalid connection string")));
    }

    #[tokio::test]
    async fn unreachable_server_gives_up_after_configured_attempts() {
        let config = MongoConfig {
            uri: "mongodb://127.0.0.1:1/?directConnection=true".to_string(),
            connect_timeout_secs: 1,
            connect_attempts: 2,
            retry_base_delay_ms: 10,
            retry_max_delay_ms: 10,
            ..MongoConfig::default()
        };

        let started = Instant::now();
        let error = connect(&config).await.unwrap_err();

        assert!(matches!(error, DatabaseError::Connect(ref m) if m.contains("after 2 attempt(s)")));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
