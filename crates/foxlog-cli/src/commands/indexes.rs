use anyhow::Context;
use foxlog_config::FoxlogConfig;
use foxlog_db::SchemaTarget;

use crate::output;

/// Handle `foxlog indexes`. Read-only.
pub async fn handle(config: &FoxlogConfig) -> anyhow::Result<()> {
    let collection = &config.bootstrap.collection;
    let target = super::connect(config).await?;
    let indexes = target
        .list_indexes(collection)
        .await
        .with_context(|| format!("failed to list indexes on {collection}"))?;

    println!("database: {}", target.database_name());
    print!("{}", output::render_indexes(collection, &indexes));
    Ok(())
}
