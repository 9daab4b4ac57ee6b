//! Field table for `error_logs` documents.
//!
//! One entry per schema property. The `$jsonSchema` validator and the local
//! `check_document` pass are both generated from this table so they cannot
//! drift apart.


/// BSON type aliases accepted by `$jsonSchema` `bsonType`.
pub const STRING_OR_NULL: &[&str] = &["string", "null"];

/// Schema entry for a single document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub bson_types: &'static [&'static str],
    pub required: bool,
    pub description: &'static str,
}

impl FieldSpec {
    const fn optional_string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            bson_types: STRING_OR_NULL,
            required: false,
            description,
        }
    }

    /// Whether a BSON type alias is allowed for this field.
    #[must_use]
    pub fn accepts(&self, bson_type: &str) -> bool {
        self.bson_types.contains(&bson_type)
    }
}

pub const ID: FieldSpec = FieldSpec {
    name: "_id",
    bson_types: &["objectId"],
    required: false,
    description: "document id",
};

pub const CREATED_TIME: FieldSpec = FieldSpec {
    name: "createdTime",
    bson_types: &["date"],
    required: true,
    description: "record creation time",
};

pub const USER_NAME: FieldSpec = FieldSpec::optional_string("userName", "user name or session uuid");
pub const MODULE_NAME: FieldSpec = FieldSpec::optional_string("moduleName", "originating module");
pub const ERROR_MESSAGE: FieldSpec = FieldSpec::optional_string("errorMessage", "error message");
pub const STACK_TRACE: FieldSpec = FieldSpec::optional_string("stackTrace", "serialized stack trace");
pub const URI: FieldSpec = FieldSpec::optional_string("uri", "request uri");
pub const METHOD: FieldSpec = FieldSpec::optional_string("method", "http method");
pub const PARAMS: FieldSpec = FieldSpec::optional_string("params", "request parameters as json");
pub const IP_ADDRESS: FieldSpec = FieldSpec::optional_string("ipAddress", "client ip address");
pub const EXCEPTION_TYPE: FieldSpec = FieldSpec::optional_string("exceptionType", "exception type");

/// Every schema property, in validator order.
pub const ALL: [FieldSpec; 11] = [
    ID,
    USER_NAME,
    MODULE_NAME,
    ERROR_MESSAGE,
    STACK_TRACE,
    URI,
    METHOD,
    PARAMS,
    IP_ADDRESS,
    CREATED_TIME,
    EXCEPTION_TYPE,
];

/// Names of the required fields.
pub fn required() -> impl Iterator<Item = &'static str> {
    ALL.iter().filter(|field| field.required).map(|field| field.name)
}
