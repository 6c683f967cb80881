//! The generic repository: timestamped insert, update and lookup of schemaless documents.
//!
//! A [`Repo`] owns a lazily created backend connection. It is built disconnected,
//! connected with [`Repo::init`] and torn down with [`Repo::done`]. Every write stamps the
//! document with `created_at`/`updated_at`, and inserts assign a fresh UUID under the
//! document's identifier key, overriding any caller-supplied value for those fields.
//!
//! `init` and `done` take `&mut self`, so setup and teardown can never overlap with data
//! operations, which only need `&self` and may run concurrently.
//!
//! # Example
//!
//! ```ignore
//! use bson::doc;
//! use docrepo::{prelude::*, memory::InMemoryStoreBuilder};
//!
//! let mut repo = Repo::new(InMemoryStoreBuilder::default(), RepoConfig::new("app"));
//! repo.init().await?;
//!
//! let user = repo.insert(&Document::new("users", [doc! { "name": "Ana" }])).await?;
//! let found = repo.find_by_id(&user).await?;
//!
//! repo.done().await?;
//! ```

use std::{future::Future, time::Duration};

use bson::doc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::RepoConfig,
    document::{CREATED_AT, Document, UPDATED_AT},
    error::{RepoError, RepoResult},
};

/// Timestamped CRUD over a backend created by `B`.
#[derive(Debug)]
pub struct Repo<B: StoreBackendBuilder> {
    builder: B,
    config: RepoConfig,
    backend: Option<B::Backend>,
}

impl<B: StoreBackendBuilder> Repo<B> {
    /// Creates a disconnected repository. Nothing is contacted until [`Repo::init`].
    pub fn new(builder: B, config: RepoConfig) -> Self {
        Self {
            builder,
            config,
            backend: None,
        }
    }

    /// The configuration the repository connects with.
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Returns `true` between a successful [`Repo::init`] and the next [`Repo::done`].
    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    /// Connects to the backing store.
    ///
    /// # Errors
    ///
    /// - [`RepoError::AlreadyInitialized`] if the repository is already connected. The
    ///   existing connection is kept.
    /// - [`RepoError::Timeout`] if connecting takes longer than the connect timeout.
    /// - Any error from the backend builder, typically [`RepoError::Connection`].
    ///
    /// On error the repository stays uninitialized and `init` may be retried.
    pub async fn init(&mut self) -> RepoResult<()> {
        if self.is_initialized() {
            return Err(RepoError::AlreadyInitialized);
        }

        info!(
            url = %self.config.redacted_url(),
            database = %self.config.database,
            "connecting"
        );

        let backend = with_deadline(
            "init",
            self.config.connect_timeout,
            self.builder.build(&self.config),
        )
        .await?;

        self.backend = Some(backend);

        Ok(())
    }

    /// Disconnects from the backing store.
    ///
    /// Does nothing on a repository that is not initialized. Afterwards the repository
    /// is uninitialized, even if shutting the backend down failed.
    ///
    /// # Errors
    ///
    /// Returns the backend's shutdown error, leaving the decision of what to do with it
    /// to the caller.
    pub async fn done(&mut self) -> RepoResult<()> {
        match self.backend.take() {
            Some(backend) => {
                info!(database = %self.config.database, "disconnecting");
                backend.shutdown().await
            }
            None => {
                debug!("done called on an uninitialized repository");
                Ok(())
            }
        }
    }

    /// Inserts a new document.
    ///
    /// The stored document is `document`'s data with a freshly generated UUID under its
    /// identifier key and `created_at`/`updated_at` set to the same current time. Those
    /// fields replace any values the caller supplied.
    ///
    /// Returns the document as it was submitted, not a re-read of the stored record.
    pub async fn insert(&self, document: &Document) -> RepoResult<Document> {
        let backend = self.backend()?;

        let now = bson::DateTime::now();
        let to_insert = document.merged(doc! {
            document.id_key(): Uuid::new_v4().to_string(),
            CREATED_AT: now,
            UPDATED_AT: now,
        });

        debug!(
            collection = to_insert.collection(),
            id_key = to_insert.id_key(),
            id = to_insert.id(),
            "inserting document"
        );

        with_deadline(
            "insert",
            self.config.timeout,
            backend.insert_document(to_insert.collection(), to_insert.data().clone()),
        )
        .await?;

        Ok(to_insert)
    }

    /// Sets every field of `document` on the stored record with the same identifier.
    ///
    /// `updated_at` is refreshed; stored fields that `document` does not carry are left
    /// as they are. An identifier that matches no record is not an error: nothing is
    /// written and the merged document is still returned.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::MissingId`] if `document` has no identifier.
    pub async fn update(&self, document: &Document) -> RepoResult<Document> {
        let backend = self.backend()?;
        require_id(document)?;

        let to_update = document.merged(doc! { UPDATED_AT: bson::DateTime::now() });

        let matched = with_deadline(
            "update",
            self.config.timeout,
            backend.set_fields(
                to_update.collection(),
                to_update.id_key(),
                to_update.id(),
                to_update.data().clone(),
            ),
        )
        .await?;

        debug!(
            collection = to_update.collection(),
            id_key = to_update.id_key(),
            id = to_update.id(),
            matched,
            "updated document"
        );

        Ok(to_update)
    }

    /// Looks up the stored record with `document`'s identifier.
    ///
    /// Returns `Ok(None)` when no record has that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::MissingId`] if `document` has no identifier.
    pub async fn find_by_id(&self, document: &Document) -> RepoResult<Option<Document>> {
        let backend = self.backend()?;
        require_id(document)?;

        debug!(
            collection = document.collection(),
            id_key = document.id_key(),
            id = document.id(),
            "finding document"
        );

        let found = with_deadline(
            "find_by_id",
            self.config.timeout,
            backend.find_one(document.collection(), document.id_key(), document.id()),
        )
        .await?;

        Ok(found.map(|data| Document::new(document.collection(), [data])))
    }

    fn backend(&self) -> RepoResult<&B::Backend> {
        self.backend.as_ref().ok_or(RepoError::NotInitialized)
    }
}

fn require_id(document: &Document) -> RepoResult<()> {
    if document.has_id() {
        return Ok(());
    }

    Err(RepoError::MissingId {
        collection: document.collection().to_string(),
        id_key: document.id_key().to_string(),
    })
}

async fn with_deadline<T, F>(operation: &'static str, after: Duration, future: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match timeout(after, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, ?after, "operation timed out");
            Err(RepoError::Timeout { operation, after })
        }
    }
}
