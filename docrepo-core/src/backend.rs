//! Storage backend abstraction for the repository.
//!
//! A [`Repo`](crate::repo::Repo) never talks to a database directly. It builds the payloads
//! and filters from a [`Document`](crate::document::Document) and hands them to a
//! [`StoreBackend`], which is created by a [`StoreBackendBuilder`] when the repository is
//! initialized.
//!
//! # Traits
//!
//! - [`StoreBackend`]: the operations a backend must support
//! - [`StoreBackendBuilder`]: factory creating a connected backend from a [`RepoConfig`]
//!
//! # Examples
//!
//! ```ignore
//! use docrepo::backend::StoreBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! backend.insert_document("users", doc! { "user_id": "a1", "name": "Alice" }).await?;
//! let found = backend.find_one("users", "user_id", "a1").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{config::RepoConfig, error::RepoResult};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be safe to share between tasks. The repository calls data
/// operations concurrently through a shared reference and never coordinates them.
///
/// # Error Handling
///
/// Driver errors should be returned as [`RepoError::Backend`](crate::error::RepoError::Backend)
/// with the original error as its source.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts one document into a collection.
    ///
    /// The collection is created on first use. Identifier uniqueness is not enforced
    /// here; the repository generates a fresh identifier for every insert.
    async fn insert_document(&self, collection: &str, document: bson::Document) -> RepoResult<()>;

    /// Sets `fields` on the first document whose `id_key` field equals `id`.
    ///
    /// Fields that are not named in `fields` are left untouched. Returns the number of
    /// documents matched, which is `0` when nothing has that identifier.
    async fn set_fields(
        &self,
        collection: &str,
        id_key: &str,
        id: &str,
        fields: bson::Document,
    ) -> RepoResult<u64>;

    /// Returns the first document whose `id_key` field equals `id`, if any.
    async fn find_one(
        &self,
        collection: &str,
        id_key: &str,
        id: &str,
    ) -> RepoResult<Option<bson::Document>>;

    /// Releases the backend's connections.
    async fn shutdown(self) -> RepoResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory for connected [`StoreBackend`] instances.
///
/// Building takes `&self` so a repository can retry `init` after a failed attempt.
#[async_trait]
pub trait StoreBackendBuilder: Send + Sync {
    type Backend: StoreBackend;

    /// Connects to the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Connection`](crate::error::RepoError::Connection) when the store
    /// cannot be reached.
    async fn build(&self, config: &RepoConfig) -> RepoResult<Self::Backend>;
}
