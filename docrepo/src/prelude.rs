//! Convenient re-exports of commonly used types from docrepo.
//!
//! ```ignore
//! use docrepo::prelude::*;
//! ```

pub use docrepo_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::RepoConfig,
    document::Document,
    error::{RepoError, RepoResult},
    repo::Repo,
};
