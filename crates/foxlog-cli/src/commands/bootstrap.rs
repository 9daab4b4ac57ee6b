use anyhow::Context;
use foxlog_config::{BootstrapConfig, FoxlogConfig};
use foxlog_db::{BootstrapOptions, Bootstrapper};

use crate::cli::BootstrapArgs;
use crate::output;
use crate::progress::Progress;
use crate::ui;

/// Handle `foxlog bootstrap`.
pub async fn handle(args: &BootstrapArgs, config: &FoxlogConfig) -> anyhow::Result<()> {
    let mut settings = config.bootstrap.clone();
    apply_args(&mut settings, args);
    if settings.drop_existing {
        tracing::warn!(
            database = %settings.database,
            collection = %settings.collection,
            "dropping collection before bootstrap"
        );
    }

    let target = super::connect(config).await?;
    let bootstrapper = Bootstrapper::new(&target, BootstrapOptions::from(&settings));

    let prefs = ui::prefs();
    let spinner = Progress::spinner(&format!(
        "provisioning {}.{}",
        settings.database, settings.collection
    ));
    let result = bootstrapper
        .run_with_progress(|event| {
            if prefs.step_lines {
                spinner.println(&output::render_step(event));
            }
            spinner.set_message(&event.step.to_string());
        })
        .await;

    let report = match result {
        Ok(report) => {
            spinner.finish_clear();
            report
        }
        Err(error) => {
            spinner.finish_err("bootstrap aborted");
            return Err(error).context("bootstrap aborted; re-run after fixing the cause");
        }
    };

    println!("{}", output::render_report(&report));
    Ok(())
}

/// Fold command-line switches into the loaded settings. Flags only ever
/// turn behavior on or off relative to the config; they never reset it.
fn apply_args(settings: &mut BootstrapConfig, args: &BootstrapArgs) {
    if args.no_seed {
        settings.seed_test_record = false;
    }
    if args.ttl {
        settings.enable_ttl = true;
    }
    if args.drop {
        settings.drop_existing = true;
    }
}
