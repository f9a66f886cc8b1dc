//! No-op mock adapter.
//!
//! Substituted by the resolver when the connection attempt fails. Exposes
//! the full [`DatabaseHandle`] surface but performs no I/O: every operation
//! resolves immediately with an empty or void result, so callers written
//! against the live adapter keep working unchanged.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::StoreResult;
use crate::handle::{CollectionHandle, DatabaseHandle};

/// A no-op database handle.
#[derive(Debug, Clone, Default)]
pub struct MockHandle;

impl MockHandle {
    /// Creates a new mock handle.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseHandle for MockHandle {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_mock(&self) -> bool {
        true
    }

    async fn collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>> {
        Ok(Box::new(MockCollection::new(name)))
    }

    async fn collections(&self) -> StoreResult<Vec<Box<dyn CollectionHandle>>> {
        Ok(vec![Box::new(MockCollection::new("mock"))])
    }

    async fn create_collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>> {
        Ok(Box::new(MockCollection::new(name)))
    }

    async fn create_index(&self, _collection: &str, _keys: Document) -> StoreResult<String> {
        Ok(String::new())
    }

    async fn drop_collection(&self, _name: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn ensure_index(&self, _collection: &str, _keys: Document) -> StoreResult<String> {
        Ok(String::new())
    }

    async fn index_information(
        &self,
        _collection: &str,
    ) -> StoreResult<HashMap<String, Document>> {
        Ok(HashMap::new())
    }

    async fn rename_collection(&self, _from: &str, _to: &str) -> StoreResult<()> {
        Ok(())
    }
}

/// A no-op collection.
#[derive(Debug, Clone)]
pub struct MockCollection {
    name: String,
}

impl MockCollection {
    /// Creates a new mock collection with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl CollectionHandle for MockCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_mock(&self) -> bool {
        true
    }

    async fn insert(&self, _document: Document) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn every_operation_resolves_with_an_empty_result() {
        let handle = MockHandle::new();

        assert!(handle.is_mock());
        assert_eq!(handle.name(), "mock");

        let collection = handle.collection("users").await.unwrap();
        assert!(collection.is_mock());
        assert_eq!(collection.name(), "users");
        collection.insert(doc! { "a": 1 }).await.unwrap();

        assert_eq!(handle.collections().await.unwrap().len(), 1);
        assert!(handle.create_collection("users").await.is_ok());
        assert_eq!(handle.create_index("users", doc! { "a": 1 }).await.unwrap(), "");
        assert_eq!(handle.ensure_index("users", doc! { "a": 1 }).await.unwrap(), "");
        assert!(handle.index_information("users").await.unwrap().is_empty());
        handle.drop_collection("users").await.unwrap();
        handle.rename_collection("users", "members").await.unwrap();
    }
}
