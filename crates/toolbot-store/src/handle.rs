//! Database handle traits.
//!
//! [`DatabaseHandle`] defines the operation surface shared by every backend:
//! the live Mongo adapter, the no-op mock substituted on connection failure,
//! and the scoped view. Code that consumes the resolver only ever sees
//! `Arc<dyn DatabaseHandle>` and cannot tell the implementations apart —
//! apart from asking [`is_mock`](DatabaseHandle::is_mock) explicitly.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::StoreResult;

/// The operation surface of a resolved database.
///
/// Covers collection access, collection lifecycle, and index management.
/// Live implementations may fail individual operations; the mock never
/// does.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Name of the underlying database.
    fn name(&self) -> &str;

    /// Returns `true` for the no-op mock substituted on connection failure.
    fn is_mock(&self) -> bool {
        false
    }

    /// Returns a handle to the named collection.
    async fn collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>>;

    /// Lists handles to all collections in the database.
    async fn collections(&self) -> StoreResult<Vec<Box<dyn CollectionHandle>>>;

    /// Creates the named collection and returns a handle to it.
    async fn create_collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>>;

    /// Creates an index over `keys` on the named collection.
    ///
    /// Returns the name of the created index.
    async fn create_index(&self, collection: &str, keys: Document) -> StoreResult<String>;

    /// Drops the named collection.
    async fn drop_collection(&self, name: &str) -> StoreResult<()>;

    /// Ensures an index over `keys` exists on the named collection.
    ///
    /// Index creation is idempotent server-side, so this is an alias for
    /// [`create_index`](Self::create_index).
    async fn ensure_index(&self, collection: &str, keys: Document) -> StoreResult<String>;

    /// Returns a mapping of index name to key specification for the named
    /// collection.
    async fn index_information(
        &self,
        collection: &str,
    ) -> StoreResult<HashMap<String, Document>>;

    /// Renames a collection within the database.
    async fn rename_collection(&self, from: &str, to: &str) -> StoreResult<()>;
}

/// A handle to a single collection.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    /// Name of the collection.
    fn name(&self) -> &str;

    /// Returns `true` for mock collections.
    fn is_mock(&self) -> bool {
        false
    }

    /// Inserts a document into the collection.
    async fn insert(&self, document: Document) -> StoreResult<()>;
}
