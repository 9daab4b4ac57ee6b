use anyhow::Context;
use foxlog_config::FoxlogConfig;
use foxlog_db::MongoTarget;

use crate::cli::Commands;
use crate::progress::Progress;

pub mod bootstrap;
pub mod indexes;
pub mod schema;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: &Commands, config: &FoxlogConfig) -> anyhow::Result<()> {
    match command {
        Commands::Bootstrap(args) => bootstrap::handle(args, config).await,
        Commands::Indexes => indexes::handle(config).await,
        Commands::Schema(args) => schema::handle(args, config),
    }
}

/// Connect behind a spinner. Failures here are always fatal.
async fn connect(config: &FoxlogConfig) -> anyhow::Result<MongoTarget> {
    let server = config.mongodb.redacted_uri();
    let spinner = Progress::spinner(&format!("connecting to {server}"));
    match MongoTarget::connect(config).await {
        Ok(target) => {
            spinner.finish_clear();
            Ok(target)
        }
        Err(error) => {
            spinner.finish_err("connection failed");
            Err(error).with_context(|| format!("cannot use MongoDB at {server}"))
        }
    }
}
