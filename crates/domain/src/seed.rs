//! Seed documents inserted during bootstrap.

use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SeedDocument
// ============================================================================

/// A literal document plus an optional field that receives the insertion time.
///
/// The timestamp is stamped right before the insert is issued, so the value
/// reflects when the document was written rather than when the plan was built.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedDocument {
    fields: Document,
    timestamp_field: Option<String>,
}

impl SeedDocument {
    pub fn new(fields: Document) -> Self {
        Self {
            fields,
            timestamp_field: None,
        }
    }

    /// Record the insertion time in `field` when the document is stamped.
    pub fn stamped_with(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn timestamp_field(&self) -> Option<&str> {
        self.timestamp_field.as_deref()
    }

    /// Produce the document to insert.
    ///
    /// A timestamp field already present in `fields` keeps its position and
    /// only has its value replaced.
    pub fn stamp(&self, now: DateTime<Utc>) -> Document {
        let mut document = self.fields.clone();
        if let Some(field) = &self.timestamp_field {
            document.insert(field.clone(), Bson::DateTime(bson::DateTime::from_chrono(now)));
        }
        document
    }
}

// ============================================================================
// SeedUser
// ============================================================================

/// Role stored in the `tipo` field of a seeded user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "administrador")]
    Administrator,
    #[serde(rename = "usuario")]
    Standard,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrador",
            Self::Standard => "usuario",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user row for the primary collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub name: String,
    pub email: String,
    /// Stored as a 32-bit integer; the validator declares `bsonType: int`.
    pub age: i32,
    pub city: Option<String>,
    pub active: bool,
    pub role: UserRole,
}

impl SeedUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32, role: UserRole) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            city: None,
            active: true,
            role,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Convert into a seed whose `data_criacao` is set at insertion.
    pub fn into_seed(self) -> SeedDocument {
        let mut fields = doc! {
            "nome": self.name,
            "email": self.email,
            "idade": Bson::Int32(self.age),
        };
        if let Some(city) = self.city {
            fields.insert("cidade", city);
        }
        fields.insert("ativo", self.active);
        // Slot reserved so the timestamp lands before `tipo`.
        fields.insert(CREATED_AT_FIELD, Bson::Null);
        fields.insert("tipo", self.role.as_str());

        SeedDocument::new(fields).stamped_with(CREATED_AT_FIELD)
    }
}

/// Field holding a user's creation time.
pub const CREATED_AT_FIELD: &str = "data_criacao";
