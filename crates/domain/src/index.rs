//! Secondary index declarations.

use bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::names::CollectionName;

/// Key order of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Numeric form used in index key documents (`1` / `-1`).
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// One field of an index key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexKey {
    pub field: String,
    pub direction: SortDirection,
}

impl IndexKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// An index to create on a collection.
///
/// The name follows the server's default convention (`field_1`,
/// `data_venda_-1`, `a_1_b_-1`), so re-declaring the same keys yields the
/// same name and the server treats the request as identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDeclaration {
    collection: CollectionName,
    keys: Vec<IndexKey>,
    unique: bool,
    name: String,
}

impl IndexDeclaration {
    /// Declare an index over one or more keys.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no keys are given, a field name is
    /// empty or starts with `$`, or a field appears twice.
    pub fn new(collection: CollectionName, keys: Vec<IndexKey>) -> Result<Self, DomainError> {
        if keys.is_empty() {
            return Err(DomainError::validation(format!(
                "Index on {collection} needs at least one key"
            )));
        }
        for (position, key) in keys.iter().enumerate() {
            if key.field.trim().is_empty() || key.field.starts_with('$') {
                return Err(DomainError::validation(format!(
                    "Invalid index field {:?} on {collection}",
                    key.field
                )));
            }
            if keys[..position].iter().any(|k| k.field == key.field) {
                return Err(DomainError::validation(format!(
                    "Index field '{}' repeated on {collection}",
                    key.field
                )));
            }
        }
        let name = keys
            .iter()
            .map(|k| format!("{}_{}", k.field, k.direction.as_i32()))
            .collect::<Vec<_>>()
            .join("_");
        Ok(Self {
            collection,
            keys,
            unique: false,
            name,
        })
    }

    /// Single-field ascending index.
    pub fn ascending(
        collection: CollectionName,
        field: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::new(collection, vec![IndexKey::ascending(field)])
    }

    /// Single-field descending index.
    pub fn descending(
        collection: CollectionName,
        field: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::new(collection, vec![IndexKey::descending(field)])
    }

    /// Mark the index as a uniqueness constraint.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    pub fn keys(&self) -> &[IndexKey] {
        &self.keys
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key specification document, e.g. `{ "data_publicacao": -1 }`.
    pub fn keys_document(&self) -> Document {
        let mut keys = Document::new();
        for key in &self.keys {
            keys.insert(key.field.clone(), Bson::Int32(key.direction.as_i32()));
        }
        keys
    }
}

impl fmt::Display for IndexDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.collection, self.name)?;
        if self.unique {
            write!(f, " (unique)")?;
        }
        Ok(())
    }
}
