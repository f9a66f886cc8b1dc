//! Scope-qualified database view.
//!
//! A [`ScopedHandle`] narrows a resolved handle to a named scope by
//! qualifying collection names as `"<scope>.<name>"` before delegating.
//! It is a pure pass-through transform: no state, no I/O of its own, and it
//! works identically over the live adapter and the mock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::StoreResult;
use crate::handle::{CollectionHandle, DatabaseHandle};

/// A view over a resolved handle that prefixes collection names with a
/// scope.
pub struct ScopedHandle {
    inner: Arc<dyn DatabaseHandle>,
    scope: String,
}

impl ScopedHandle {
    /// Wraps `inner`, qualifying collection names with `scope`.
    pub fn new(inner: Arc<dyn DatabaseHandle>, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    /// Returns the scope this view qualifies names with.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.scope, name)
    }
}

#[async_trait]
impl DatabaseHandle for ScopedHandle {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_mock(&self) -> bool {
        self.inner.is_mock()
    }

    async fn collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>> {
        self.inner.collection(&self.qualify(name)).await
    }

    async fn collections(&self) -> StoreResult<Vec<Box<dyn CollectionHandle>>> {
        self.inner.collections().await
    }

    async fn create_collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>> {
        self.inner.create_collection(&self.qualify(name)).await
    }

    async fn create_index(&self, collection: &str, keys: Document) -> StoreResult<String> {
        self.inner.create_index(&self.qualify(collection), keys).await
    }

    async fn drop_collection(&self, name: &str) -> StoreResult<()> {
        self.inner.drop_collection(&self.qualify(name)).await
    }

    async fn ensure_index(&self, collection: &str, keys: Document) -> StoreResult<String> {
        self.inner.ensure_index(&self.qualify(collection), keys).await
    }

    async fn index_information(
        &self,
        collection: &str,
    ) -> StoreResult<HashMap<String, Document>> {
        self.inner.index_information(&self.qualify(collection)).await
    }

    async fn rename_collection(&self, from: &str, to: &str) -> StoreResult<()> {
        self.inner
            .rename_collection(&self.qualify(from), &self.qualify(to))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHandle;

    #[tokio::test]
    async fn collection_names_are_scope_qualified() {
        let scoped = ScopedHandle::new(Arc::new(MockHandle::new()), "sessions");

        let collection = scoped.collection("users").await.unwrap();
        assert_eq!(collection.name(), "sessions.users");

        let created = scoped.create_collection("tokens").await.unwrap();
        assert_eq!(created.name(), "sessions.tokens");
    }

    #[tokio::test]
    async fn scoping_preserves_the_backing_handle() {
        let scoped = ScopedHandle::new(Arc::new(MockHandle::new()), "sessions");
        assert!(scoped.is_mock());
        assert_eq!(scoped.name(), "mock");
        assert_eq!(scoped.scope(), "sessions");
    }
}
