//! Error types for port operations.

/// Administrative operation errors, classified by what the server rejected.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// A collection with this name already exists in the database.
    #[error("Collection already exists: {collection}")]
    CollectionExists { collection: String },

    /// A unique index rejected a duplicate key value.
    #[error("Duplicate key in {collection}: {message}")]
    DuplicateKey { collection: String, message: String },

    /// A document did not satisfy the collection's validator.
    #[error("Document failed validation in {collection}: {message}")]
    ValidationFailed { collection: String, message: String },

    /// An index with the same name or keys exists with different options.
    #[error("Index conflict on {collection}: {message}")]
    IndexConflict { collection: String, message: String },

    /// Any other server or transport failure - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

impl AdminError {
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Check if the server refused to create an existing collection.
    pub fn is_collection_exists(&self) -> bool {
        matches!(self, Self::CollectionExists { .. })
    }

    /// Check if a uniqueness constraint was violated.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Check if the schema validator rejected a document.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }
}
