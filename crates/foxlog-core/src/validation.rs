//! Boundary validation of raw `error_logs` documents.
//!
//! Applies the same rules as the server-side `$jsonSchema` validator. The
//! collection validator only warns, so nothing here blocks a write on its
//! own; callers choose between logging the violations and rejecting.

use std::fmt;

use bson::{Bson, Document};

use crate::errors::CoreError;
use crate::fields::{self, FieldSpec};

/// Why a field broke the validator rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    WrongType {
        expected: &'static [&'static str],
        found: &'static str,
    },
}

/// A single rule violation on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{} is required", self.field),
            ViolationKind::WrongType { expected, found } => write!(
                f,
                "{} must be {} (found {found})",
                self.field,
                expected.join(" or ")
            ),
        }
    }
}

/// `$jsonSchema` alias for the BSON type of `value`.
#[must_use]
pub const fn bson_type_alias(value: &Bson) -> &'static str {
    match value {
        Bson::Double(_) => "double",
        Bson::String(_) => "string",
        Bson::Array(_) => "array",
        Bson::Document(_) => "object",
        Bson::Boolean(_) => "bool",
        Bson::Null => "null",
        Bson::RegularExpression(_) => "regex",
        Bson::JavaScriptCode(_) => "javascript",
        Bson::JavaScriptCodeWithScope(_) => "javascriptWithScope",
        Bson::Int32(_) => "int",
        Bson::Int64(_) => "long",
        Bson::Timestamp(_) => "timestamp",
        Bson::Binary(_) => "binData",
        Bson::ObjectId(_) => "objectId",
        Bson::DateTime(_) => "date",
        Bson::Symbol(_) => "symbol",
        Bson::Decimal128(_) => "decimal",
        Bson::Undefined => "undefined",
        Bson::MaxKey => "maxKey",
        Bson::MinKey => "minKey",
        Bson::DbPointer(_) => "dbPointer",
    }
}

fn check_field(document: &Document, field: &FieldSpec) -> Option<Violation> {
    match document.get(field.name) {
        None if field.required => Some(Violation {
            field: field.name,
            kind: ViolationKind::Missing,
        }),
        None => None,
        Some(value) => {
            let found = bson_type_alias(value);
            (!field.accepts(found)).then_some(Violation {
                field: field.name,
                kind: ViolationKind::WrongType {
                    expected: field.bson_types,
                    found,
                },
            })
        }
    }
}

/// Every violation of the collection rules in `document`.
///
/// Unknown fields are allowed, matching the validator which does not set
/// `additionalProperties`.
#[must_use]
pub fn check_document(document: &Document) -> Vec<Violation> {
    fields::ALL
        .iter()
        .filter_map(|field| check_field(document, field))
        .collect()
}

/// Fail with `CoreError::Validation` if `document` breaks any rule.
///
/// # Errors
///
/// Returns every violation found.
pub fn ensure_valid(document: &Document) -> Result<(), CoreError> {
    let violations = check_document(document);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}
