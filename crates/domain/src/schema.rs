//! `$jsonSchema` validator declarations.
//!
//! A [`JsonSchema`] describes the rules a collection's documents must satisfy.
//! It is only a declaration: enforcement happens inside the database engine
//! once the schema is attached to a collection as its validator.

use bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

// ============================================================================
// BsonType
// ============================================================================

/// BSON type aliases accepted by the `bsonType` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BsonType {
    Object,
    Array,
    String,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    Double,
    Bool,
    Date,
    ObjectId,
}

impl BsonType {
    /// The alias string used in validator documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::ObjectId => "objectId",
        }
    }

    /// Whether `minimum`/`maximum` make sense for this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Long | Self::Double)
    }
}

impl fmt::Display for BsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FieldRule
// ============================================================================

/// Constraints on a single document field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    bson_type: BsonType,
    pattern: Option<String>,
    min_length: Option<u32>,
    minimum: Option<i64>,
    maximum: Option<i64>,
    description: Option<String>,
}

impl FieldRule {
    pub fn new(bson_type: BsonType) -> Self {
        Self {
            bson_type,
            pattern: None,
            min_length: None,
            minimum: None,
            maximum: None,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(BsonType::String)
    }

    pub fn int() -> Self {
        Self::new(BsonType::Int)
    }

    pub fn bool() -> Self {
        Self::new(BsonType::Bool)
    }

    /// Require string values to match a regular expression.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Require string values to be at least `length` characters long.
    pub fn with_min_length(mut self, length: u32) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Inclusive numeric bounds.
    pub fn with_range(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn bson_type(&self) -> BsonType {
        self.bson_type
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn min_length(&self) -> Option<u32> {
        self.min_length
    }

    pub fn minimum(&self) -> Option<i64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<i64> {
        self.maximum
    }

    fn check(&self, field: &str) -> Result<(), DomainError> {
        if self.pattern.is_some() && self.bson_type != BsonType::String {
            return Err(DomainError::validation(format!(
                "Field '{field}' declares a pattern but is not a string"
            )));
        }
        if self.min_length.is_some() && self.bson_type != BsonType::String {
            return Err(DomainError::validation(format!(
                "Field '{field}' declares a minimum length but is not a string"
            )));
        }
        if (self.minimum.is_some() || self.maximum.is_some()) && !self.bson_type.is_numeric() {
            return Err(DomainError::validation(format!(
                "Field '{field}' declares numeric bounds but is {}",
                self.bson_type
            )));
        }
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                return Err(DomainError::validation(format!(
                    "Field '{field}' has minimum {min} greater than maximum {max}"
                )));
            }
        }
        Ok(())
    }

    /// Render as the property document of a `$jsonSchema`.
    pub fn to_document(&self) -> Document {
        let mut rule = doc! { "bsonType": self.bson_type.as_str() };
        if let Some(pattern) = &self.pattern {
            rule.insert("pattern", pattern.as_str());
        }
        if let Some(length) = self.min_length {
            rule.insert("minLength", Bson::Int64(i64::from(length)));
        }
        if let Some(minimum) = self.minimum {
            rule.insert("minimum", Bson::Int64(minimum));
        }
        if let Some(maximum) = self.maximum {
            rule.insert("maximum", Bson::Int64(maximum));
        }
        if let Some(description) = &self.description {
            rule.insert("description", description.as_str());
        }
        rule
    }
}

// ============================================================================
// JsonSchema
// ============================================================================

/// A declared property and whether documents must carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRule {
    pub name: String,
    pub required: bool,
    pub rule: FieldRule,
}

/// An object-level `$jsonSchema` validator.
///
/// Properties keep their declaration order so the rendered document reads
/// the same way it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchema {
    properties: Vec<PropertyRule>,
}

impl JsonSchema {
    /// Start declaring an object schema.
    pub fn object() -> JsonSchemaBuilder {
        JsonSchemaBuilder {
            properties: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyRule> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Names of the fields every document must carry, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Render the schema body (the value of `$jsonSchema`).
    pub fn to_document(&self) -> Document {
        let mut properties = Document::new();
        for property in &self.properties {
            properties.insert(property.name.clone(), property.rule.to_document());
        }
        let required: Vec<Bson> = self
            .required()
            .into_iter()
            .map(|name| Bson::String(name.to_string()))
            .collect();

        doc! {
            "bsonType": BsonType::Object.as_str(),
            "required": required,
            "properties": properties,
        }
    }

    /// Render as a collection validator: `{ $jsonSchema: { ... } }`.
    pub fn to_validator(&self) -> Document {
        doc! { "$jsonSchema": self.to_document() }
    }
}

/// Builder for [`JsonSchema`]; checks the declarations on `build`.
#[derive(Debug, Clone)]
pub struct JsonSchemaBuilder {
    properties: Vec<PropertyRule>,
}

impl JsonSchemaBuilder {
    pub fn required(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.properties.push(PropertyRule {
            name: name.into(),
            required: true,
            rule,
        });
        self
    }

    pub fn optional(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.properties.push(PropertyRule {
            name: name.into(),
            required: false,
            rule,
        });
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a field name is empty, starts with
    /// `$`, is declared twice, or carries constraints that do not fit its type.
    pub fn build(self) -> Result<JsonSchema, DomainError> {
        for (index, property) in self.properties.iter().enumerate() {
            if property.name.trim().is_empty() {
                return Err(DomainError::validation("Schema field name cannot be empty"));
            }
            if property.name.starts_with('$') {
                return Err(DomainError::validation(format!(
                    "Schema field '{}' cannot start with '$'",
                    property.name
                )));
            }
            if self.properties[..index]
                .iter()
                .any(|earlier| earlier.name == property.name)
            {
                return Err(DomainError::validation(format!(
                    "Schema field '{}' is declared twice",
                    property.name
                )));
            }
            property.rule.check(&property.name)?;
        }
        Ok(JsonSchema {
            properties: self.properties,
        })
    }
}
