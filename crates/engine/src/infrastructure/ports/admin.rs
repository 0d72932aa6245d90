//! Database administration port.

use async_trait::async_trait;
use crudinit_domain::bson::Document;
use crudinit_domain::{CollectionName, IndexDeclaration};

use super::error::AdminError;

// =============================================================================
// Database Admin
// =============================================================================

/// Administrative calls against one selected database.
///
/// Every method is a single server round trip. Implementations must not
/// retry or swallow server rejections: a collection that already exists or a
/// duplicate seed is reported as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseAdmin: Send + Sync {
    // Schema
    async fn create_collection(
        &self,
        name: &CollectionName,
        validator: Option<Document>,
    ) -> Result<(), AdminError>;
    async fn create_index(&self, index: &IndexDeclaration) -> Result<(), AdminError>;

    // Data
    /// Ordered insert; returns the number of documents written.
    async fn insert_many(
        &self,
        collection: &CollectionName,
        documents: Vec<Document>,
    ) -> Result<usize, AdminError>;

    // Introspection
    async fn list_collection_names(&self) -> Result<Vec<String>, AdminError>;
    async fn list_index_names(&self, collection: &str) -> Result<Vec<String>, AdminError>;
    async fn count_documents(&self, collection: &str) -> Result<u64, AdminError>;
}
