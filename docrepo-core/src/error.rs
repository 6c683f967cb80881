//! Error types and result types for repository operations.
//!
//! Use [`RepoResult<T>`] as the return type for fallible operations. Errors raised by a
//! database driver are kept as the `source` of [`RepoError::Connection`] or
//! [`RepoError::Backend`], so callers that need driver-specific detail can downcast them.

use std::{error::Error as StdError, time::Duration};

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Boxed driver error carried by [`RepoError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Represents all possible errors that can occur when working with a repository.
#[derive(Error, Debug)]
pub enum RepoError {
    /// `init` was called on a repository that is already connected.
    #[error("repository already initialized")]
    AlreadyInitialized,
    /// A data operation was attempted before `init` succeeded (or after `done`).
    #[error("repository not initialized")]
    NotInitialized,
    /// The document carries no identifier under its identifier key.
    #[error("document in collection {collection} has no {id_key}")]
    MissingId {
        collection: String,
        id_key: String,
    },
    /// The operation did not complete within the configured deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
    /// The backend could not be reached or the connection could not be set up.
    #[error("connection error: {0}")]
    Connection(#[source] BoxError),
    /// An error reported by the underlying storage backend.
    #[error("backend error: {0}")]
    Backend(#[source] BoxError),
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Wraps a driver error raised while connecting.
    pub fn connection<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        RepoError::Connection(err.into())
    }

    /// Wraps a driver error raised by a data operation.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        RepoError::Backend(err.into())
    }
}

/// A specialized `Result` type for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

impl From<BsonError> for RepoError {
    fn from(err: BsonError) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for RepoError {
    fn from(err: SerdeJsonError) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("socket closed")]
    struct DriverError;

    #[test]
    fn backend_error_keeps_driver_source() {
        let err = RepoError::backend(DriverError);

        assert_eq!(err.to_string(), "backend error: socket closed");

        let source = err.source().expect("source should be kept");
        assert!(source.downcast_ref::<DriverError>().is_some());
    }

    #[test]
    fn missing_id_names_collection_and_key() {
        let err = RepoError::MissingId {
            collection: "users".into(),
            id_key: "user_id".into(),
        };

        assert_eq!(err.to_string(), "document in collection users has no user_id");
    }
}
