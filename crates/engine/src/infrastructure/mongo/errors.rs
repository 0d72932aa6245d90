//! Classification of MongoDB server errors.

use mongodb::error::{Error, ErrorKind, WriteFailure};

use crate::infrastructure::ports::AdminError;

/// `NamespaceExists`
pub const NAMESPACE_EXISTS: i32 = 48;
/// `IndexOptionsConflict`
pub const INDEX_OPTIONS_CONFLICT: i32 = 85;
/// `IndexKeySpecsConflict`
pub const INDEX_KEY_SPECS_CONFLICT: i32 = 86;
/// `DocumentValidationFailure`
pub const DOCUMENT_VALIDATION_FAILURE: i32 = 121;
/// `DuplicateKey`
pub const DUPLICATE_KEY: i32 = 11000;

/// Server error code carried by a command or write failure.
///
/// For ordered inserts only the first write error matters: the server stops
/// there.
pub fn server_code(err: &Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => Some(command.code),
        ErrorKind::Write(WriteFailure::WriteError(write)) => Some(write.code),
        ErrorKind::InsertMany(insert) => insert
            .write_errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|write| write.code),
        _ => None,
    }
}

/// Map a driver error from `operation` on `collection` into an [`AdminError`].
pub fn classify(err: Error, operation: &'static str, collection: &str) -> AdminError {
    from_code(server_code(&err), err.to_string(), operation, collection)
}

pub(crate) fn from_code(
    code: Option<i32>,
    message: String,
    operation: &'static str,
    collection: &str,
) -> AdminError {
    let collection = collection.to_string();
    match code {
        Some(NAMESPACE_EXISTS) => AdminError::CollectionExists { collection },
        Some(DUPLICATE_KEY) => AdminError::DuplicateKey {
            collection,
            message,
        },
        Some(DOCUMENT_VALIDATION_FAILURE) => AdminError::ValidationFailed {
            collection,
            message,
        },
        Some(INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT) => AdminError::IndexConflict {
            collection,
            message,
        },
        _ => AdminError::Database { operation, message },
    }
}
