//! Collection validator for `error_logs`.

use bson::{Bson, Document, doc};

use crate::fields::{self, FieldSpec};

/// Which writes the server checks against the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Off,
    Strict,
    /// Inserts and updates to already-valid documents only.
    Moderate,
}

impl ValidationLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Strict => "strict",
            Self::Moderate => "moderate",
        }
    }
}

/// What the server does with a document that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationAction {
    Error,
    /// Accept the write and record a warning in the server log.
    Warn,
}

impl ValidationAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
        }
    }
}

/// Validator rule plus the level and action it is enforced with.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionValidator {
    pub schema: Document,
    pub level: ValidationLevel,
    pub action: ValidationAction,
}

impl CollectionValidator {
    /// The `error_logs` validator: `createdTime` required as a date, every
    /// other field string-or-null, warn only.
    ///
    /// Log ingestion must never fail closed, so the action stays `Warn`.
    #[must_use]
    pub fn error_logs() -> Self {
        Self {
            schema: json_schema(&fields::ALL),
            level: ValidationLevel::Moderate,
            action: ValidationAction::Warn,
        }
    }

    /// The `validator` option value: `{ "$jsonSchema": ... }`.
    #[must_use]
    pub fn validator_document(&self) -> Document {
        doc! { "$jsonSchema": self.schema.clone() }
    }

    /// `collMod` command re-applying this validator to an existing collection.
    #[must_use]
    pub fn coll_mod_command(&self, collection: &str) -> Document {
        doc! {
            "collMod": collection,
            "validator": self.validator_document(),
            "validationLevel": self.level.as_str(),
            "validationAction": self.action.as_str(),
        }
    }
}

fn bson_type_value(types: &[&str]) -> Bson {
    match types {
        [single] => Bson::String((*single).to_string()),
        many => Bson::Array(many.iter().map(|t| Bson::String((*t).to_string())).collect()),
    }
}

/// Build a `$jsonSchema` object document from a field table.
#[must_use]
pub fn json_schema(fields: &[FieldSpec]) -> Document {
    let mut properties = Document::new();
    for field in fields {
        properties.insert(
            field.name,
            doc! {
                "bsonType": bson_type_value(field.bson_types),
                "description": field.description,
            },
        );
    }

    let required: Vec<Bson> = fields
        .iter()
        .filter(|field| field.required)
        .map(|field| Bson::String(field.name.to_string()))
        .collect();

    doc! {
        "bsonType": "object",
        "required": required,
        "properties": properties,
    }
}
