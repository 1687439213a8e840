//! Driven port for the event table: schema, batch writes and the two read
//! aggregations.
//!
//! The two reads deliberately differ in fault tolerance. A footprint that
//! cannot be parsed is skipped by [`EventStore::feature_collection`], while an
//! organization id that cannot be decoded fails
//! [`EventStore::distinct_org_ids`] as a whole.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{FeatureCollection, RawRecord};

define_port_error! {
    /// Errors raised by event store adapters.
    pub enum EventStoreError {
        /// No connection to the store could be obtained.
        Connection { message: String } =>
            "event store connection failed: {message}",
        /// A statement or query failed to execute or decode.
        Query { message: String } =>
            "event store query failed: {message}",
        /// A record in the batch could not be encoded for the statement.
        InvalidRecord { line: u64, message: String } =>
            "record on line {line} cannot be stored: {message}",
    }
}

/// Capability set of the persistence layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Create the event table if it does not exist yet.
    async fn create_schema(&self) -> Result<(), EventStoreError>;

    /// Write one batch with a single statement and return the rows inserted.
    ///
    /// Records whose timestamp does not parse are dropped from the batch
    /// before the statement is built; the rest are written atomically.
    async fn insert_batch(&self, records: &[RawRecord]) -> Result<usize, EventStoreError>;

    /// Rebuild every parseable stored footprint as a feature collection.
    async fn feature_collection(&self) -> Result<FeatureCollection, EventStoreError>;

    /// Distinct organization ids of rows whose footprint is present and not
    /// JSON `null`.
    async fn distinct_org_ids(&self) -> Result<Vec<i32>, EventStoreError>;
}

/// Fixture store that accepts every write and holds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEventStore;

#[async_trait]
impl EventStore for FixtureEventStore {
    async fn create_schema(&self) -> Result<(), EventStoreError> {
        Ok(())
    }

    async fn insert_batch(&self, records: &[RawRecord]) -> Result<usize, EventStoreError> {
        Ok(records.len())
    }

    async fn feature_collection(&self) -> Result<FeatureCollection, EventStoreError> {
        Ok(FeatureCollection::new())
    }

    async fn distinct_org_ids(&self) -> Result<Vec<i32>, EventStoreError> {
        Ok(Vec::new())
    }
}
