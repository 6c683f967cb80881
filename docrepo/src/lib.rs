//! Main docrepo crate: a minimal generic repository over document databases.
//!
//! This crate is the primary entry point for users of docrepo. It re-exports the core
//! types and gives access to the available storage backends.
//!
//! # Features
//!
//! - **Schemaless documents** - Untyped key/value payloads tagged with a collection name
//! - **Derived identifiers** - `users` documents are identified by `user_id`, `people` by `person_id`
//! - **Automatic timestamps** - `created_at` and `updated_at` are managed on every write
//! - **Multiple backends** - In-memory and MongoDB storage behind one trait
//!
//! # Quick Start
//!
//! ```ignore
//! use bson::doc;
//! use docrepo::{prelude::*, memory::InMemoryStoreBuilder};
//!
//! #[tokio::main]
//! async fn main() -> RepoResult<()> {
//!     let mut repo = Repo::new(InMemoryStoreBuilder::default(), RepoConfig::new("app"));
//!     repo.init().await?;
//!
//!     // Insert assigns `user_id`, `created_at` and `updated_at`
//!     let ana = repo.insert(&Document::new("users", [doc! { "name": "Ana" }])).await?;
//!
//!     // Update sets the given fields and refreshes `updated_at`
//!     repo.update(&ana.merged(doc! { "name": "Ana Maria" })).await?;
//!
//!     // Lookup returns `None` when nothing has the identifier
//!     let stored = repo.find_by_id(&ana).await?;
//!     println!("stored: {:?}", stored);
//!
//!     repo.done().await
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use docrepo_core::{backend, config, document, error, inflection, repo};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docrepo_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docrepo_mongodb::{MongoDbStore, MongoDbStoreBuilder, MongoRepo};
}
