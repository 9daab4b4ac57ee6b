//! The record type, the server validator and the index plan must agree on
//! field names.

use std::collections::BTreeSet;

use bson::oid::ObjectId;
use bson::DateTime;
use foxlog_core::indexes::index_plan;
use foxlog_core::validation::check_document;
use foxlog_core::{CollectionValidator, ErrorLogRecord};
use pretty_assertions::assert_eq;

fn schema_properties() -> BTreeSet<String> {
    CollectionValidator::error_logs()
        .schema
        .get_document("properties")
        .unwrap()
        .keys()
        .cloned()
        .collect()
}

#[test]
fn record_fields_match_validator_properties() {
    let record = ErrorLogRecord {
        id: Some(ObjectId::new()),
        ..ErrorLogRecord::new(DateTime::now())
    };
    let doc = record.to_document().unwrap();
    let record_fields: BTreeSet<String> = doc.keys().cloned().collect();

    assert_eq!(record_fields, schema_properties());
}

#[test]
fn indexed_fields_are_schema_properties() {
    let properties = schema_properties();
    for spec in index_plan(Some(60)) {
        for key in &spec.keys {
            assert!(
                properties.contains(key.field),
                "index {} uses unknown field {}",
                spec.name,
                key.field
            );
        }
    }
}

#[test]
fn every_serialized_record_passes_local_validation() {
    let mut record = ErrorLogRecord::new(DateTime::now());
    assert!(check_document(&record.to_document().unwrap()).is_empty());

    record.stack_trace = Some("at handler (files.rs:10)".into());
    record.exception_type = Some("IoError".into());
    assert!(check_document(&record.to_document().unwrap()).is_empty());
}
