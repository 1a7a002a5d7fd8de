use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::schema::ensure_schema;

/// How long a connection waits on another writer's lock before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const MEMORY_URL: &str = "sqlite::memory:";
const SQLITE_SCHEME: &str = "sqlite://";
const FILE_SCHEME: &str = "file:";

/// A store secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Where a connection URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// Private in-memory database (`sqlite::memory:`).
    Memory,
    /// Database file (`sqlite://<path>` or a bare path).
    Path(PathBuf),
    /// SQLite URI filename (`file:...`), passed through as-is.
    Uri(String),
}

impl StoreTarget {
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        if url == MEMORY_URL {
            Self::Memory
        } else if let Some(path) = url.strip_prefix(SQLITE_SCHEME) {
            Self::Path(PathBuf::from(path))
        } else if url.starts_with(FILE_SCHEME) {
            Self::Uri(url.to_string())
        } else {
            Self::Path(PathBuf::from(url))
        }
    }
}

impl fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str(MEMORY_URL),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Uri(uri) => f.write_str(uri),
        }
    }
}

/// Connection parameters for the store.
///
/// SQLite has no accounts: `user` tags the run and `credential` is only
/// checked for presence by the caller.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub user: String,
    pub credential: Credential,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, user: impl Into<String>, credential: Credential) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            credential,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn target(&self) -> StoreTarget {
        StoreTarget::parse(&self.url)
    }

    /// Opens a connection, applies pragmas and makes sure the schema exists.
    pub fn open(&self) -> Result<Connection> {
        let target = self.target();
        let open_error = |source| StoreError::Open {
            target: target.to_string(),
            source,
        };
        let conn = match &target {
            StoreTarget::Memory => Connection::open_in_memory(),
            StoreTarget::Path(path) => Connection::open(path),
            StoreTarget::Uri(uri) => Connection::open_with_flags(
                uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            ),
        }
        .map_err(open_error)?;
        conn.busy_timeout(self.busy_timeout).map_err(open_error)?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(open_error)?;
        ensure_schema(&conn)?;
        debug!(store = %target, user = %self.user, "store opened");
        Ok(conn)
    }
}
