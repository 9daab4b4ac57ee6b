//! Human-readable rendering for stdout.

use std::fmt::Write as _;

use anyhow::Context;
use bson::{Bson, Document, doc};
use foxlog_core::{CollectionValidator, IndexSpec};
use foxlog_db::{BootstrapReport, IndexSummary, StepEvent, StepOutcome};

fn banner(title: &str) -> String {
    format!("========== {title} ==========")
}

/// One line per completed step, e.g. `✓ index idx_userName: created`.
pub fn render_step(event: &StepEvent) -> String {
    let mark = if event.outcome.is_failure() { '✗' } else { '✓' };
    format!("{mark} {}: {}", event.step, event.outcome)
}

fn render_index_line(out: &mut String, index: &IndexSummary) {
    let _ = write!(out, "  - {}: {}", index.name, index.keys_json());
    if let Some(secs) = index.expire_after_secs {
        let _ = write!(out, " (expires after {secs}s)");
    }
    out.push('\n');
}

/// Index listing with a section header, as printed by `foxlog indexes`.
pub fn render_indexes(collection: &str, indexes: &[IndexSummary]) -> String {
    let mut out = banner(&format!("{collection} indexes"));
    out.push('\n');
    if indexes.is_empty() {
        out.push_str("  (collection does not exist)\n");
    }
    for index in indexes {
        render_index_line(&mut out, index);
    }
    out
}

/// Closing summary of a bootstrap run.
pub fn render_report(report: &BootstrapReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&banner("database"));
    let _ = writeln!(out, "\ndatabase: {}", report.database);
    out.push_str("collections:\n");
    for name in &report.collections {
        let _ = writeln!(out, "  - {name}");
    }

    out.push('\n');
    out.push_str(&render_indexes(&report.collection, &report.indexes));
    if let Some(stale) = report.stale_ttl_index() {
        let _ = writeln!(
            out,
            "  note: {} is left from an earlier run and still expires logs; drop it to keep them",
            stale.name
        );
    }

    match report.seed_outcome() {
        Some(outcome) if outcome.is_failure() => {
            let _ = writeln!(out, "\n✗ seed record {outcome}");
        }
        Some(outcome) => {
            let _ = writeln!(out, "\n✓ seed record {outcome}");
        }
        None => out.push_str("\nseed record disabled\n"),
    }

    let failures = report.failures().count();
    out.push('\n');
    if failures == 0 {
        out.push_str(&banner("bootstrap complete"));
    } else {
        out.push_str(&banner(&format!(
            "bootstrap complete with {failures} warning(s)"
        )));
    }
    out
}

fn index_plan_entry(spec: &IndexSpec) -> anyhow::Result<Document> {
    let mut entry = doc! {
        "name": spec.name,
        "key": spec.keys_document(),
        "background": true,
    };
    if let Some(secs) = spec.expire_after_secs {
        let secs = i64::try_from(secs).context("expiration does not fit in a BSON int64")?;
        entry.insert("expireAfterSeconds", secs);
    }
    Ok(entry)
}

/// Validator and index plan as pretty JSON, keys in definition order.
pub fn render_schema(
    database: &str,
    collection: &str,
    validator: &CollectionValidator,
    plan: &[IndexSpec],
) -> anyhow::Result<String> {
    let indexes = plan
        .iter()
        .map(|spec| index_plan_entry(spec).map(Bson::Document))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let document = doc! {
        "database": database,
        "collection": collection,
        "validator": validator.validator_document(),
        "validationLevel": validator.level.as_str(),
        "validationAction": validator.action.as_str(),
        "indexes": indexes,
    };
    Ok(serde_json::to_string_pretty(
        &Bson::Document(document).into_relaxed_extjson(),
    )?)
}
