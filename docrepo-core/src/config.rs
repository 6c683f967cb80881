//! Connection and deadline settings for a [`Repo`](crate::repo::Repo).

use std::{env, time::Duration};

/// Environment variable read by [`RepoConfig::from_env`].
pub const URL_ENV_VAR: &str = "MONGODB_URL";
/// Connection URL used when none is given.
pub const DEFAULT_URL: &str = "mongodb://localhost:27017";
/// Deadline applied to every data operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline applied to establishing the connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings a repository connects and operates with.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use docrepo::config::RepoConfig;
///
/// let config = RepoConfig::new("app")
///     .with_url("mongodb://db.internal:27017")
///     .with_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Connection URL of the backing database.
    pub url: String,
    /// Name of the database holding the collections.
    pub database: String,
    /// Deadline for each insert, update and lookup.
    pub timeout: Duration,
    /// Deadline for establishing the connection in `init`.
    pub connect_timeout: Duration,
}

impl RepoConfig {
    /// Creates a configuration for `database` with the default URL and deadlines.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: database.into(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Creates a configuration for `database`, taking the URL from `MONGODB_URL`.
    ///
    /// Falls back to [`DEFAULT_URL`] when the variable is unset or empty.
    pub fn from_env(database: impl Into<String>) -> Self {
        Self::new(database).with_url(url_or_default(env::var(URL_ENV_VAR).ok()))
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// The URL with any password replaced, for logging.
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }
}

fn url_or_default(url: Option<String>) -> String {
    url.filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return url.to_string();
    };

    match rest[..at].split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{}", &rest[at + 1..]),
        None => url.to_string(),
    }
}
