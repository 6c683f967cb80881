//! A minimal generic repository over schemaless document databases.
//!
//! This crate is the core of the docrepo project and provides:
//!
//! - **Documents** ([`document`]) - Schemaless, collection-tagged key/value records
//! - **Inflection** ([`inflection`]) - English singularization for identifier keys
//! - **Repository** ([`repo`]) - Timestamped insert, update and lookup by identifier
//! - **Store backend abstraction** ([`backend`]) - Traits implemented by storage backends
//! - **Configuration** ([`config`]) - Connection URL, database name and deadlines
//! - **Error handling** ([`error`]) - Error and result types
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
//! let ana = repo.insert(&Document::new("users", [doc! { "name": "Ana" }])).await?;
//! assert_eq!(ana.id_key(), "user_id");
//!
//! let renamed = repo.update(&ana.merged(doc! { "name": "Ana Maria" })).await?;
//! let stored = repo.find_by_id(&renamed).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_core;

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod inflection;
pub mod repo;
