//! MongoDB implementation of the admin port.

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crudinit_domain::{CollectionName, IndexDeclaration};

use super::errors::classify;
use crate::infrastructure::ports::{AdminError, DatabaseAdmin};

/// Admin handle bound to one selected database.
#[derive(Clone)]
pub struct MongoAdmin {
    database: Database,
}

impl MongoAdmin {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DatabaseAdmin for MongoAdmin {
    async fn create_collection(
        &self,
        name: &CollectionName,
        validator: Option<Document>,
    ) -> Result<(), AdminError> {
        let action = self.database.create_collection(name.as_str());
        let result = match validator {
            Some(validator) => action.validator(validator).await,
            None => action.await,
        };
        result.map_err(|e| classify(e, "create_collection", name.as_str()))
    }

    async fn create_index(&self, index: &IndexDeclaration) -> Result<(), AdminError> {
        let options = IndexOptions::builder()
            .name(index.name().to_string())
            .unique(index.is_unique().then_some(true))
            .build();
        let model = IndexModel::builder()
            .keys(index.keys_document())
            .options(options)
            .build();

        self.collection(index.collection().as_str())
            .create_index(model)
            .await
            .map(|_| ())
            .map_err(|e| classify(e, "create_index", index.collection().as_str()))
    }

    async fn insert_many(
        &self,
        collection: &CollectionName,
        documents: Vec<Document>,
    ) -> Result<usize, AdminError> {
        let result = self
            .collection(collection.as_str())
            .insert_many(documents)
            .await
            .map_err(|e| classify(e, "insert_many", collection.as_str()))?;
        Ok(result.inserted_ids.len())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AdminError> {
        self.database
            .list_collection_names()
            .await
            .map_err(|e| AdminError::database("list_collection_names", e))
    }

    async fn list_index_names(&self, collection: &str) -> Result<Vec<String>, AdminError> {
        self.collection(collection)
            .list_index_names()
            .await
            .map_err(|e| classify(e, "list_index_names", collection))
    }

    async fn count_documents(&self, collection: &str) -> Result<u64, AdminError> {
        self.collection(collection)
            .count_documents(doc! {})
            .await
            .map_err(|e| classify(e, "count_documents", collection))
    }
}
