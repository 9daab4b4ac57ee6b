//! Database error types for foxlog-db.

use mongodb::error::{Error as MongoError, ErrorKind};
use thiserror::Error;

/// Server error code for `NamespaceExists`.
pub const NAMESPACE_EXISTS: i32 = 48;
/// Server error code for `NamespaceNotFound`.
pub const NAMESPACE_NOT_FOUND: i32 = 26;
/// Server error code for `Unauthorized`.
pub const UNAUTHORIZED: i32 = 13;
/// Server error code for `IndexOptionsConflict`.
pub const INDEX_OPTIONS_CONFLICT: i32 = 85;
/// Server error code for `IndexKeySpecsConflict`.
pub const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The server could not be reached or the connection string is unusable.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Authentication failed or the user lacks a required privilege.
    #[error("Not authorized during {step}: {message}")]
    Unauthorized { step: String, message: String },

    /// A server command failed for a reason other than "already exists".
    #[error("{step} failed: {source}")]
    Command {
        step: String,
        #[source]
        source: MongoError,
    },

    /// A document could not be built for insertion.
    #[error(transparent)]
    Core(#[from] foxlog_core::CoreError),
}

impl DatabaseError {
    /// Wrap a driver error raised by `step`, singling out privilege failures.
    pub fn from_step(step: impl Into<String>, error: MongoError) -> Self {
        let step = step.into();
        if is_unauthorized(&error) {
            Self::Unauthorized {
                step,
                message: error.to_string(),
            }
        } else {
            Self::Command {
                step,
                source: error,
            }
        }
    }
}

/// Server error code carried by a command failure, if any.
#[must_use]
pub fn command_code(error: &MongoError) -> Option<i32> {
    match error.kind.as_ref() {
        ErrorKind::Command(command) => Some(command.code),
        _ => None,
    }
}

#[must_use]
pub fn is_namespace_exists(error: &MongoError) -> bool {
    command_code(error) == Some(NAMESPACE_EXISTS)
}

#[must_use]
pub fn is_namespace_not_found(error: &MongoError) -> bool {
    command_code(error) == Some(NAMESPACE_NOT_FOUND)
}

/// The requested index clashes with an existing one: same key pattern under
/// another name or with other options, or same name with another key.
#[must_use]
pub fn is_index_conflict(error: &MongoError) -> bool {
    matches!(
        command_code(error),
        Some(INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT)
    )
}

#[must_use]
pub fn is_unauthorized(error: &MongoError) -> bool {
    matches!(error.kind.as_ref(), ErrorKind::Authentication { .. })
        || command_code(error) == Some(UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::command_error;
    use rstest::rstest;

    #[rstest]
    #[case(NAMESPACE_EXISTS, "NamespaceExists")]
    #[case(NAMESPACE_NOT_FOUND, "NamespaceNotFound")]
    #[case(INDEX_OPTIONS_CONFLICT, "IndexOptionsConflict")]
    #[case(INDEX_KEY_SPECS_CONFLICT, "IndexKeySpecsConflict")]
    #[case(UNAUTHORIZED, "Unauthorized")]
    fn command_code_is_read_from_server_errors(#[case] code: i32, #[case] name: &str) {
        assert_eq!(command_code(&command_error(code, name, "server says no")), Some(code));
    }

    #[test]
    fn predicates_match_only_their_codes() {
        let exists = command_error(NAMESPACE_EXISTS, "NamespaceExists", "collection already exists");
        assert!(is_namespace_exists(&exists));
        assert!(!is_namespace_not_found(&exists));
        assert!(!is_index_conflict(&exists));

        let renamed = command_error(
            INDEX_OPTIONS_CONFLICT,
            "IndexOptionsConflict",
            "Index already exists with a different name: userName_1",
        );
        assert!(is_index_conflict(&renamed));
        assert!(is_index_conflict(&command_error(INDEX_KEY_SPECS_CONFLICT, "IndexKeySpecsConflict", "")));
        assert!(!is_unauthorized(&renamed));
    }

    #[test]
    fn from_step_singles_out_privilege_errors() {
        let denied = DatabaseError::from_step(
            "create index idx_userName",
            command_error(UNAUTHORIZED, "Unauthorized", "not authorized on foxnas_logs"),
        );
        assert!(matches!(
            denied,
            DatabaseError::Unauthorized { ref step, .. } if step == "create index idx_userName"
        ));

        let other = DatabaseError::from_step(
            "collMod error_logs",
            command_error(NAMESPACE_NOT_FOUND, "NamespaceNotFound", "ns does not exist"),
        );
        assert!(matches!(other, DatabaseError::Command { .. }));
        assert!(other.to_string().starts_with("collMod error_logs failed"));
    }
}
