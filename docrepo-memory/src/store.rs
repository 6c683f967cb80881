//! In-memory storage implementation for the repository.
//!
//! This module provides a simple in-memory backend that keeps documents as BSON maps,
//! grouped by collection, behind async-safe read-write locks.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use tracing::debug;

use docrepo_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::RepoConfig,
    error::RepoResult,
};

type StoreMap = HashMap<String, Vec<bson::Document>>;


/// Thread-safe in-memory document storage backend.
///
/// Documents are kept in insertion order per collection. Lookups and updates scan the
/// collection and act on the first document whose identifier field matches, mirroring
/// `findOne`/`updateOne` on a document database without a unique index.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Example
///
/// ```ignore
/// use docrepo_memory::InMemoryStore;
/// use docrepo::backend::StoreBackend;
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     store.insert_document("users", doc! { "user_id": "a1", "name": "Alice" }).await?;
///
///     let found = store.find_one("users", "user_id", "a1").await?;
///     assert!(found.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder over a fresh, empty store.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Returns a snapshot of every document in `collection`, in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<bson::Document> {
        self.store
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the names of the collections holding at least one document.
    pub async fn collections(&self) -> Vec<String> {
        self.store
            .read()
            .await
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

fn has_id(document: &bson::Document, id_key: &str, id: &str) -> bool {
    document
        .get_str(id_key)
        .is_ok_and(|value| value == id)
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, collection: &str, document: bson::Document) -> RepoResult<()> {
        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(())
    }

    async fn set_fields(
        &self,
        collection: &str,
        id_key: &str,
        id: &str,
        fields: bson::Document,
    ) -> RepoResult<u64> {
        let mut store = self.store.write().await;

        let Some(document) = store
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|doc| has_id(doc, id_key, id)))
        else {
            return Ok(0);
        };

        for (key, value) in fields {
            document.insert(key, value);
        }

        Ok(1)
    }

    async fn find_one(
        &self,
        collection: &str,
        id_key: &str,
        id: &str,
    ) -> RepoResult<Option<bson::Document>> {
        Ok(
            self.store
                .read()
                .await
                .get(collection)
                .and_then(|documents| documents.iter().find(|doc| has_id(doc, id_key, id)))
                .cloned()
        )
    }
}


/// Builder for [`InMemoryStore`] backends.
///
/// Every backend built by the same builder shares one store, so data outlives a
/// `done`/`init` cycle of the repository the way it would with a real database.
/// The database name from the configuration is not used.
///
/// # Example
///
/// ```ignore
/// use docrepo::{prelude::*, memory::InMemoryStoreBuilder};
///
/// let builder = InMemoryStoreBuilder::default();
/// let store = builder.store().clone();
/// let mut repo = Repo::new(builder, RepoConfig::new("app"));
/// ```
#[derive(Default, Debug)]
pub struct InMemoryStoreBuilder {
    store: InMemoryStore,
}

impl InMemoryStoreBuilder {
    /// Creates a builder over an existing store.
    pub fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }

    /// The store shared by every backend this builder creates.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Returns a handle to the shared store. This always succeeds.
    async fn build(&self, config: &RepoConfig) -> RepoResult<Self::Backend> {
        debug!(database = %config.database, "using in-memory store");

        Ok(self.store.clone())
    }
}
