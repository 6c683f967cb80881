//! In-memory document storage backend for docrepo.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for development
//! and tests, where running a database server is not worth it.
//!
//! # Quick Start
//!
//! ```ignore
//! use bson::doc;
//! use docrepo::{prelude::*, memory::InMemoryStoreBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut repo = Repo::new(InMemoryStoreBuilder::default(), RepoConfig::new("app"));
//!     repo.init().await?;
//!
//!     let user = repo.insert(&Document::new("users", [doc! { "name": "Alice" }])).await?;
//!     assert!(repo.find_by_id(&user).await?.is_some());
//!
//!     repo.done().await?;
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
