//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the concrete [`EventStore`](crate::domain::ports::EventStore)
//! backed by PostgreSQL via `diesel-async` with `bb8` connection pooling.
//! Row structs (`models.rs`) and the table definition (`schema.rs`) stay
//! internal; only domain types cross the boundary.
//!
//! # Example
//!
//! ```ignore
//! use planet::outbound::persistence::{DbPool, DieselEventStore, PoolConfig};
//!
//! let pool = DbPool::connect_lazy(PoolConfig::single("postgres://localhost/mydb"));
//! let store = DieselEventStore::new(pool);
//! ```

mod diesel_event_store;
mod models;
mod pool;
mod schema;

pub use diesel_event_store::DieselEventStore;
pub use pool::{DbPool, PoolConfig, PoolError, SHARED_POOL_SIZE};
