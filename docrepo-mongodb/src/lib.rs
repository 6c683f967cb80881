//! MongoDB backend implementation for docrepo.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait on top
//! of the official async driver.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docrepo = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! The connection URL and database name come from the repository's
//! [`RepoConfig`](docrepo_core::config::RepoConfig). `RepoConfig::from_env` reads the URL
//! from `MONGODB_URL`. Initialization pings the server, so an unreachable database is
//! reported by `init` rather than by the first write.
//!
//! # Example
//!
//! ```ignore
//! use bson::doc;
//! use docrepo::{prelude::*, mongodb::MongoRepo};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut repo = MongoRepo::new(Default::default(), RepoConfig::from_env("my_database"));
//!     repo.init().await?;
//!
//!     let user = repo.insert(&Document::new("users", [doc! { "name": "Ana" }])).await?;
//!     println!("inserted {}", user.id());
//!
//!     repo.done().await?;
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_mongodb;

pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};

/// A repository backed by MongoDB.
pub type MongoRepo = docrepo_core::repo::Repo<MongoDbStoreBuilder>;
