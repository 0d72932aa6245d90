//! In-memory stand-in for a MongoDB database.
//!
//! Enforces the parts of server behaviour the bootstrap relies on:
//! - `NamespaceExists` when a collection is created twice
//! - `$jsonSchema` validators (`required`, `bsonType`, `pattern`, `minLength`,
//!   `minimum`, `maximum`)
//! - unique indexes, including against documents already present
//! - ordered inserts that stop at the first rejected document
//! - implicit collection creation on index creation or insert

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use crudinit_domain::bson::{oid::ObjectId, Bson, Document};
use crudinit_domain::{CollectionName, IndexDeclaration};
use regex::Regex;

use crate::infrastructure::ports::{AdminError, DatabaseAdmin};

/// Name of the index every collection carries.
const ID_INDEX: &str = "_id_";

#[derive(Debug, Default, Clone)]
struct MemoryCollection {
    validator: Option<Document>,
    indexes: Vec<IndexDeclaration>,
    documents: Vec<Document>,
}

#[derive(Default)]
pub struct InMemoryAdmin {
    collections: Mutex<BTreeMap<String, MemoryCollection>>,
}

impl InMemoryAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the documents stored in `collection`.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock()
            .get(collection)
            .map(|c| c.documents.clone())
            .unwrap_or_default()
    }

    /// Validator attached to `collection`, if any.
    pub fn validator(&self, collection: &str) -> Option<Document> {
        self.lock()
            .get(collection)
            .and_then(|c| c.validator.clone())
    }

    /// Unique indexes declared on `collection`, by name.
    pub fn unique_index_names(&self, collection: &str) -> Vec<String> {
        self.lock()
            .get(collection)
            .map(|c| {
                c.indexes
                    .iter()
                    .filter(|i| i.is_unique())
                    .map(|i| i.name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, MemoryCollection>> {
        self.collections
            .lock()
            .expect("in-memory admin lock poisoned")
    }
}

#[async_trait]
impl DatabaseAdmin for InMemoryAdmin {
    async fn create_collection(
        &self,
        name: &CollectionName,
        validator: Option<Document>,
    ) -> Result<(), AdminError> {
        let mut collections = self.lock();
        if collections.contains_key(name.as_str()) {
            return Err(AdminError::CollectionExists {
                collection: name.to_string(),
            });
        }
        collections.insert(
            name.to_string(),
            MemoryCollection {
                validator,
                ..Default::default()
            },
        );
        Ok(())
    }

    async fn create_index(&self, index: &IndexDeclaration) -> Result<(), AdminError> {
        let mut collections = self.lock();
        let collection = collections
            .entry(index.collection().to_string())
            .or_default();

        if let Some(existing) = collection
            .indexes
            .iter()
            .find(|i| i.name() == index.name() || i.keys() == index.keys())
        {
            if existing == index {
                return Ok(());
            }
            return Err(AdminError::IndexConflict {
                collection: index.collection().to_string(),
                message: format!(
                    "An existing index has the same name or keys as the requested index: {}",
                    existing.name()
                ),
            });
        }

        if index.is_unique() {
            let mut seen: Vec<Vec<Bson>> = Vec::new();
            for document in &collection.documents {
                let key = index_key(index, document);
                if seen.contains(&key) {
                    return Err(duplicate_key(index, &key));
                }
                seen.push(key);
            }
        }

        collection.indexes.push(index.clone());
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: &CollectionName,
        documents: Vec<Document>,
    ) -> Result<usize, AdminError> {
        let mut collections = self.lock();
        let target = collections.entry(collection.to_string()).or_default();

        let mut inserted = 0;
        for mut document in documents {
            if let Some(validator) = &target.validator {
                validate(validator, &document).map_err(|message| AdminError::ValidationFailed {
                    collection: collection.to_string(),
                    message,
                })?;
            }

            for index in target.indexes.iter().filter(|i| i.is_unique()) {
                let key = index_key(index, &document);
                if target
                    .documents
                    .iter()
                    .any(|existing| index_key(index, existing) == key)
                {
                    return Err(duplicate_key(index, &key));
                }
            }

            if !document.contains_key("_id") {
                document.insert("_id", ObjectId::new());
            }
            target.documents.push(document);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AdminError> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn list_index_names(&self, collection: &str) -> Result<Vec<String>, AdminError> {
        let collections = self.lock();
        let Some(target) = collections.get(collection) else {
            return Err(AdminError::database(
                "list_index_names",
                format!("ns does not exist: {collection}"),
            ));
        };
        Ok(std::iter::once(ID_INDEX.to_string())
            .chain(target.indexes.iter().map(|i| i.name().to_string()))
            .collect())
    }

    async fn count_documents(&self, collection: &str) -> Result<u64, AdminError> {
        Ok(self
            .lock()
            .get(collection)
            .map(|c| c.documents.len() as u64)
            .unwrap_or(0))
    }
}

/// Values of the index fields; missing fields index as null.
fn index_key(index: &IndexDeclaration, document: &Document) -> Vec<Bson> {
    index
        .keys()
        .iter()
        .map(|key| document.get(&key.field).cloned().unwrap_or(Bson::Null))
        .collect()
}

fn duplicate_key(index: &IndexDeclaration, key: &[Bson]) -> AdminError {
    AdminError::DuplicateKey {
        collection: index.collection().to_string(),
        message: format!("E11000 duplicate key error index: {} dup key: {key:?}", index.name()),
    }
}

// =============================================================================
// $jsonSchema evaluation
// =============================================================================

fn validate(validator: &Document, document: &Document) -> Result<(), String> {
    let Ok(schema) = validator.get_document("$jsonSchema") else {
        return Ok(());
    };

    if let Ok(required) = schema.get_array("required") {
        for field in required.iter().filter_map(Bson::as_str) {
            if !document.contains_key(field) {
                return Err(format!("missing required property '{field}'"));
            }
        }
    }

    let Ok(properties) = schema.get_document("properties") else {
        return Ok(());
    };
    for (field, rule) in properties {
        let (Some(value), Bson::Document(rule)) = (document.get(field), rule) else {
            continue;
        };
        check_property(field, rule, value)?;
    }
    Ok(())
}

fn check_property(field: &str, rule: &Document, value: &Bson) -> Result<(), String> {
    if let Ok(expected) = rule.get_str("bsonType") {
        if !matches_bson_type(expected, value) {
            return Err(format!(
                "property '{field}' must be {expected}, found {:?}",
                value.element_type()
            ));
        }
    }

    if let (Ok(pattern), Bson::String(text)) = (rule.get_str("pattern"), value) {
        let regex = Regex::new(pattern).map_err(|e| format!("bad pattern on '{field}': {e}"))?;
        if !regex.is_match(text) {
            return Err(format!("property '{field}' does not match {pattern}"));
        }
    }

    if let (Some(length), Bson::String(text)) = (rule.get("minLength").and_then(as_f64), value) {
        if (text.chars().count() as f64) < length {
            return Err(format!("property '{field}' is shorter than {length} characters"));
        }
    }

    if let Some(number) = as_f64(value) {
        if let Some(minimum) = rule.get("minimum").and_then(as_f64) {
            if number < minimum {
                return Err(format!("property '{field}' is below minimum {minimum}"));
            }
        }
        if let Some(maximum) = rule.get("maximum").and_then(as_f64) {
            if number > maximum {
                return Err(format!("property '{field}' is above maximum {maximum}"));
            }
        }
    }
    Ok(())
}

fn matches_bson_type(expected: &str, value: &Bson) -> bool {
    match expected {
        "object" => matches!(value, Bson::Document(_)),
        "array" => matches!(value, Bson::Array(_)),
        "string" => matches!(value, Bson::String(_)),
        "int" => matches!(value, Bson::Int32(_)),
        "long" => matches!(value, Bson::Int64(_)),
        "double" => matches!(value, Bson::Double(_)),
        "bool" => matches!(value, Bson::Boolean(_)),
        "date" => matches!(value, Bson::DateTime(_)),
        "objectId" => matches!(value, Bson::ObjectId(_)),
        _ => false,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudinit_domain::bson::doc;

    fn name(s: &str) -> CollectionName {
        CollectionName::new(s).unwrap()
    }

    #[tokio::test]
    async fn identical_index_is_accepted_twice() {
        let admin = InMemoryAdmin::new();
        let index = IndexDeclaration::ascending(name("posts"), "titulo").unwrap();

        admin.create_index(&index).await.unwrap();
        admin.create_index(&index).await.unwrap();

        assert_eq!(
            admin.list_index_names("posts").await.unwrap(),
            vec!["_id_", "titulo_1"]
        );
    }

    #[tokio::test]
    async fn same_keys_with_different_options_conflict() {
        let admin = InMemoryAdmin::new();
        let plain = IndexDeclaration::ascending(name("usuarios"), "email").unwrap();

        admin.create_index(&plain).await.unwrap();
        let err = admin.create_index(&plain.clone().unique()).await.unwrap_err();

        assert!(matches!(err, AdminError::IndexConflict { .. }));
    }

    #[tokio::test]
    async fn unique_index_over_existing_duplicates_fails() {
        let admin = InMemoryAdmin::new();
        admin
            .insert_many(
                &name("vendas"),
                vec![doc! { "produto": "p1" }, doc! { "produto": "p1" }],
            )
            .await
            .unwrap();

        let index = IndexDeclaration::ascending(name("vendas"), "produto")
            .unwrap()
            .unique();
        assert!(admin.create_index(&index).await.unwrap_err().is_duplicate_key());
    }

    #[tokio::test]
    async fn ordered_insert_keeps_documents_before_the_failure() {
        let admin = InMemoryAdmin::new();
        admin
            .create_index(
                &IndexDeclaration::ascending(name("produtos"), "nome")
                    .unwrap()
                    .unique(),
            )
            .await
            .unwrap();

        let result = admin
            .insert_many(
                &name("produtos"),
                vec![
                    doc! { "nome": "a" },
                    doc! { "nome": "b" },
                    doc! { "nome": "a" },
                    doc! { "nome": "c" },
                ],
            )
            .await;

        assert!(result.unwrap_err().is_duplicate_key());
        assert_eq!(admin.count_documents("produtos").await.unwrap(), 2);
    }

    #[test]
    fn validator_checks_numeric_bounds_across_types() {
        let validator = doc! {
            "$jsonSchema": {
                "bsonType": "object",
                "properties": { "preco": { "bsonType": "double", "minimum": 0_i64 } }
            }
        };
        assert!(validate(&validator, &doc! { "preco": 9.5 }).is_ok());
        assert!(validate(&validator, &doc! { "preco": -0.5 }).is_err());
        assert!(validate(&validator, &doc! { "preco": 3_i32 }).is_err());
        assert!(validate(&validator, &doc! {}).is_ok());
    }

    #[test]
    fn validator_counts_characters_for_min_length() {
        let validator = doc! {
            "$jsonSchema": {
                "properties": { "nome": { "bsonType": "string", "minLength": 2_i64 } }
            }
        };
        assert!(validate(&validator, &doc! { "nome": "Zé" }).is_ok());
        assert!(validate(&validator, &doc! { "nome": "Z" }).is_err());
        assert!(validate(&validator, &doc! { "nome": "" }).is_err());
    }
}
