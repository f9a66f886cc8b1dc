//! Live Mongo adapter.
//!
//! Thin translation from the [`DatabaseHandle`] surface onto the official
//! driver. The connection is verified with a `ping` at construction time so
//! the resolver can decide between this adapter and the mock before handing
//! anything to callers.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database, IndexModel};

use crate::error::{StoreError, StoreResult};
use crate::handle::{CollectionHandle, DatabaseHandle};

/// Database used when the connection string carries no path segment.
pub const DEFAULT_DATABASE: &str = "toolbot";

/// A live database connection.
pub struct MongoHandle {
    client: Client,
    database: Database,
}

impl MongoHandle {
    /// Connects to the given URL and verifies the connection with a ping.
    ///
    /// The database is taken from the URL's path segment, falling back to
    /// [`DEFAULT_DATABASE`]. `timeout` bounds server selection, so an
    /// unreachable server fails within it instead of hanging on the driver
    /// default.
    pub async fn connect(url: &str, timeout: Duration) -> StoreResult<Self> {
        let mut options =
            ClientOptions::parse(url)
                .await
                .map_err(|source| StoreError::InvalidUrl {
                    url: url.to_string(),
                    source,
                })?;
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).map_err(|source| StoreError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| StoreError::Connect {
                url: url.to_string(),
                source,
            })?;

        Ok(Self { client, database })
    }

    fn typed(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DatabaseHandle for MongoHandle {
    fn name(&self) -> &str {
        self.database.name()
    }

    async fn collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>> {
        Ok(Box::new(MongoCollection {
            inner: self.typed(name),
        }))
    }

    async fn collections(&self) -> StoreResult<Vec<Box<dyn CollectionHandle>>> {
        let names = self.database.list_collection_names().await?;
        Ok(names
            .into_iter()
            .map(|name| {
                Box::new(MongoCollection {
                    inner: self.typed(&name),
                }) as Box<dyn CollectionHandle>
            })
            .collect())
    }

    async fn create_collection(&self, name: &str) -> StoreResult<Box<dyn CollectionHandle>> {
        self.database.create_collection(name).await?;
        Ok(Box::new(MongoCollection {
            inner: self.typed(name),
        }))
    }

    async fn create_index(&self, collection: &str, keys: Document) -> StoreResult<String> {
        let model = IndexModel::builder().keys(keys).build();
        let result = self.typed(collection).create_index(model).await?;
        Ok(result.index_name)
    }

    async fn drop_collection(&self, name: &str) -> StoreResult<()> {
        self.typed(name).drop().await?;
        Ok(())
    }

    async fn ensure_index(&self, collection: &str, keys: Document) -> StoreResult<String> {
        self.create_index(collection, keys).await
    }

    async fn index_information(
        &self,
        collection: &str,
    ) -> StoreResult<HashMap<String, Document>> {
        let mut cursor = self.typed(collection).list_indexes().await?;
        let mut info = HashMap::new();
        while let Some(index) = cursor.try_next().await? {
            let name = index
                .options
                .and_then(|options| options.name)
                .unwrap_or_default();
            info.insert(name, index.keys);
        }
        Ok(info)
    }

    async fn rename_collection(&self, from: &str, to: &str) -> StoreResult<()> {
        let database = self.database.name();
        self.client
            .database("admin")
            .run_command(doc! {
                "renameCollection": format!("{database}.{from}"),
                "to": format!("{database}.{to}"),
            })
            .await?;
        Ok(())
    }
}

/// A live collection.
pub struct MongoCollection {
    inner: mongodb::Collection<Document>,
}

#[async_trait]
impl CollectionHandle for MongoCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn insert(&self, document: Document) -> StoreResult<()> {
        self.inner.insert_one(document).await?;
        Ok(())
    }
}
