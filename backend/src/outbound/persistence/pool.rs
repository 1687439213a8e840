//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! The pool opens connections on first checkout, so a process starts while
//! the database is still coming up and reports the failure on the first
//! query instead.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::config::DatabaseSettings;

/// Connections kept by the API, shared across request workers.
pub const SHARED_POOL_SIZE: u32 = 10;

const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// A connection could not be handed out within the checkout timeout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no database connection available: {message}")]
pub struct PoolError {
    message: String,
}

/// Target database and pool size.
///
/// # Examples
/// ```
/// use planet::config::DatabaseSettings;
/// use planet::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::shared(&DatabaseSettings::default());
/// assert_eq!(config.max_size(), 10);
/// assert_eq!(PoolConfig::single("postgres://localhost/events").max_size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    /// Pool for the API, connecting with `settings`.
    pub fn shared(settings: &DatabaseSettings) -> Self {
        Self {
            database_url: settings.connection_url(),
            max_size: SHARED_POOL_SIZE,
        }
    }

    /// One connection for the sequential loader.
    pub fn single(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 1,
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool that connects lazily.
    pub fn connect_lazy(config: PoolConfig) -> Self {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(None)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build_unchecked(manager);
        Self { inner }
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// Returns [`PoolError`] when no connection can be opened or freed before
    /// the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner.get().await.map_err(|err| PoolError {
            message: err.to_string(),
        })
    }
}
