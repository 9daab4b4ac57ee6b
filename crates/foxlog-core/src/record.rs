//! The `error_logs` document model and the bootstrap seed record.

use bson::oid::ObjectId;
use bson::{DateTime, Document};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation;

/// One captured application error, as stored in `error_logs`.
///
/// Records are append-only: logging services insert them and nothing updates
/// them afterwards. Only `created_time` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLogRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_name: Option<String>,
    pub module_name: Option<String>,
    pub error_message: Option<String>,
    pub stack_trace: Option<String>,
    pub uri: Option<String>,
    pub method: Option<String>,
    pub params: Option<String>,
    pub ip_address: Option<String>,
    pub created_time: DateTime,
    pub exception_type: Option<String>,
}

impl ErrorLogRecord {
    /// Exception type carried by the bootstrap test record.
    pub const SEED_EXCEPTION_TYPE: &'static str = "TestException";
    pub const SEED_USER_NAME: &'static str = "system";
    pub const SEED_MODULE_NAME: &'static str = "init";

    /// Empty record stamped with `created_time`.
    #[must_use]
    pub const fn new(created_time: DateTime) -> Self {
        Self {
            id: None,
            user_name: None,
            module_name: None,
            error_message: None,
            stack_trace: None,
            uri: None,
            method: None,
            params: None,
            ip_address: None,
            created_time,
            exception_type: None,
        }
    }

    /// Fixed placeholder record used to verify that writes succeed.
    #[must_use]
    pub fn seed(now: chrono::DateTime<Utc>) -> Self {
        Self {
            user_name: Some(Self::SEED_USER_NAME.to_string()),
            module_name: Some(Self::SEED_MODULE_NAME.to_string()),
            error_message: Some("error log collection bootstrap test record".to_string()),
            stack_trace: Some(String::new()),
            uri: Some("/api/init".to_string()),
            method: Some("GET".to_string()),
            params: Some("{}".to_string()),
            ip_address: Some("127.0.0.1".to_string()),
            exception_type: Some(Self::SEED_EXCEPTION_TYPE.to_string()),
            ..Self::new(DateTime::from_millis(now.timestamp_millis()))
        }
    }

    /// Filter matching the seed record, used to keep re-runs at one copy.
    #[must_use]
    pub fn seed_filter() -> Document {
        bson::doc! {
            "userName": Self::SEED_USER_NAME,
            "moduleName": Self::SEED_MODULE_NAME,
            "exceptionType": Self::SEED_EXCEPTION_TYPE,
        }
    }

    /// Convert to a BSON document ready for insertion.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialize` if BSON encoding fails.
    pub fn to_document(&self) -> Result<Document, CoreError> {
        Ok(bson::to_document(self)?)
    }

    /// Convert to BSON and reject the result if it breaks validator rules.
    ///
    /// The server only warns on bad documents; this is for callers that want
    /// a hard guarantee before writing.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every violation, or
    /// `CoreError::Serialize` if encoding fails.
    pub fn to_validated_document(&self) -> Result<Document, CoreError> {
        let document = self.to_document()?;
        validation::ensure_valid(&document)?;
        Ok(document)
    }
}
