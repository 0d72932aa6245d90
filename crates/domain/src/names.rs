//! Validated name newtypes for database objects
//!
//! These newtypes ensure that names are accepted by the server by construction:
//! - Non-empty
//! - Free of the characters MongoDB reserves in namespaces
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length in bytes for a database name
const MAX_DATABASE_NAME_LENGTH: usize = 63;

/// Characters MongoDB rejects in database names (Unix and Windows rules combined)
const FORBIDDEN_DATABASE_CHARS: &[char] = &['/', '\\', '.', ' ', '"', '$', '*', '<', '>', ':', '|', '?'];

// ============================================================================
// DatabaseName
// ============================================================================

/// A validated database name (non-empty, <=63 bytes, no reserved characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Create a new validated database name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 63 bytes
    /// - The name contains a reserved character or NUL
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Database name cannot be empty"));
        }
        if trimmed.len() > MAX_DATABASE_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Database name cannot exceed {} bytes",
                MAX_DATABASE_NAME_LENGTH
            )));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| *c == '\0' || FORBIDDEN_DATABASE_CHARS.contains(c))
        {
            return Err(DomainError::validation(format!(
                "Database name cannot contain {:?}",
                c
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DatabaseName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DatabaseName> for String {
    fn from(name: DatabaseName) -> String {
        name.0
    }
}

// ============================================================================
// CollectionName
// ============================================================================

/// A validated collection name (non-empty, no `$` or NUL, not a `system.` collection)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Create a new validated collection name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name contains `$` or NUL
    /// - The name starts with the reserved `system.` prefix
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Collection name cannot be empty"));
        }
        if trimmed.contains('$') || trimmed.contains('\0') {
            return Err(DomainError::validation(
                "Collection name cannot contain '$' or NUL",
            ));
        }
        if trimmed.starts_with("system.") {
            return Err(DomainError::validation(
                "Collection name cannot use the reserved 'system.' prefix",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> String {
        name.0
    }
}

impl PartialEq<str> for CollectionName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
