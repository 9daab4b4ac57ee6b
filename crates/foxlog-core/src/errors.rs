//! Cross-cutting error types for foxlog.
//!
//! Crate-specific errors (`ConfigError`, `DatabaseError`) live in their own
//! crates. Everything converges into `anyhow` inside `foxlog-cli`.

use thiserror::Error;

use crate::validation::Violation;

/// Errors raised while building or checking error-log documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A document does not satisfy the collection validator rules.
    #[error("Document failed validation: {}", format_violations(.0))]
    Validation(Vec<Violation>),

    /// A record could not be converted to BSON.
    #[error("BSON serialization failed: {0}")]
    Serialize(#[from] bson::ser::Error),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
