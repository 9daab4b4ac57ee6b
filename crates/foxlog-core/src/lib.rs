//! # foxlog-core
//!
//! Shared types for the foxlog error-log collection bootstrapper.
//!
//! This crate holds everything that describes the `error_logs` collection
//! without talking to a server:
//! - `ErrorLogRecord`, the document shape written by logging services
//! - The field table that drives both the server validator and local checks
//! - The `$jsonSchema` collection validator (warn action, moderate level)
//! - The index plan (six secondary indexes plus the optional TTL index)
//! - Boundary validation of raw BSON documents
//! - Cross-cutting error types

pub mod errors;
pub mod fields;
pub mod indexes;
pub mod record;
pub mod validation;
pub mod validator;

pub use errors::CoreError;
pub use indexes::{IndexKey, IndexSpec, SortOrder};
pub use record::ErrorLogRecord;
pub use validator::{CollectionValidator, ValidationAction, ValidationLevel};

/// Logical database holding the error-log collection.
pub const DEFAULT_DATABASE: &str = "foxnas_logs";

/// Collection receiving one document per captured application error.
pub const DEFAULT_COLLECTION: &str = "error_logs";
