//! Shared helper utilities for integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module holds the in-memory store double and, in [`cluster`], the embedded
//! PostgreSQL harness, so each suite does not copy them.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Mutex;

use async_trait::async_trait;
use planet::domain::ports::{EventStore, EventStoreError};
use planet::domain::{Feature, FeatureCollection, RawRecord};

pub mod cluster;

/// In-memory event store recording every batch and serving canned reads.
#[derive(Default)]
pub struct InMemoryEventStore {
    batches: Mutex<Vec<Vec<RawRecord>>>,
    footprints: Vec<serde_json::Value>,
    org_ids: Vec<i32>,
    failure: Option<EventStoreError>,
}

impl InMemoryEventStore {
    /// Store whose reads return the given footprints and ids.
    pub fn with_reads(footprints: Vec<serde_json::Value>, org_ids: Vec<i32>) -> Self {
        Self {
            footprints,
            org_ids,
            ..Self::default()
        }
    }

    /// Store failing every call with `error`.
    pub fn failing(error: EventStoreError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Batches received so far.
    pub fn batches(&self) -> Vec<Vec<RawRecord>> {
        self.batches.lock().expect("batches lock").clone()
    }

    fn check(&self) -> Result<(), EventStoreError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create_schema(&self) -> Result<(), EventStoreError> {
        self.check()
    }

    async fn insert_batch(&self, records: &[RawRecord]) -> Result<usize, EventStoreError> {
        self.check()?;
        self.batches
            .lock()
            .expect("batches lock")
            .push(records.to_vec());
        Ok(records.len())
    }

    async fn feature_collection(&self) -> Result<FeatureCollection, EventStoreError> {
        self.check()?;
        Ok(self
            .footprints
            .iter()
            .cloned()
            .filter_map(|value| Feature::from_value(value).ok())
            .collect())
    }

    async fn distinct_org_ids(&self) -> Result<Vec<i32>, EventStoreError> {
        self.check()?;
        Ok(self.org_ids.clone())
    }
}
