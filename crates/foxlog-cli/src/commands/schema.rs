use foxlog_config::FoxlogConfig;
use foxlog_core::CollectionValidator;
use foxlog_core::indexes::index_plan;

use crate::cli::SchemaArgs;
use crate::output;

/// Handle `foxlog schema`. Never connects.
pub fn handle(args: &SchemaArgs, config: &FoxlogConfig) -> anyhow::Result<()> {
    let settings = &config.bootstrap;
    let ttl = if args.ttl {
        Some(settings.ttl_seconds)
    } else {
        settings.ttl()
    };

    let rendered = output::render_schema(
        &settings.database,
        &settings.collection,
        &CollectionValidator::error_logs(),
        &index_plan(ttl),
    )?;
    println!("{rendered}");
    Ok(())
}
