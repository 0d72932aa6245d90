//! crudinit Domain - declarations for the baseline CRUD database.
//!
//! Everything here is pure data: validated names, `$jsonSchema` validators,
//! index declarations, seed documents and the ordered plan that ties them
//! together. The engine crate is responsible for issuing the plan.

pub mod baseline;
pub mod error;
pub mod index;
pub mod names;
pub mod plan;
pub mod schema;
pub mod seed;

pub use baseline::{baseline_plan, seed_users, users_schema, DEFAULT_DATABASE};
pub use error::DomainError;
pub use index::{IndexDeclaration, IndexKey, SortDirection};
pub use names::{CollectionName, DatabaseName};
pub use plan::{BootstrapPlan, BootstrapStep};
pub use schema::{BsonType, FieldRule, JsonSchema, JsonSchemaBuilder, PropertyRule};
pub use seed::{SeedDocument, SeedUser, UserRole, CREATED_AT_FIELD};

// Re-exported so callers build documents with the same BSON version.
pub use bson;
