//! Read-side service implementing the [`EventsQuery`] driving port.
//!
//! Results are forwarded from the store untouched. Every store failure
//! becomes an internal error carrying the store's message verbatim.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{EventStore, EventStoreError, EventsQuery, OrganizationIds};
use crate::domain::{Error, FeatureCollection};

/// Aggregation service over an [`EventStore`].
#[derive(Clone)]
pub struct EventsQueryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> EventsQueryService<S> {
    /// Create a service reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn map_store_error(error: EventStoreError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<S> EventsQuery for EventsQueryService<S>
where
    S: EventStore + ?Sized,
{
    async fn feature_collection(&self) -> Result<FeatureCollection, Error> {
        self.store
            .feature_collection()
            .await
            .map_err(map_store_error)
    }

    async fn organization_ids(&self) -> Result<OrganizationIds, Error> {
        let org_ids = self
            .store
            .distinct_org_ids()
            .await
            .map_err(map_store_error)?;
        Ok(OrganizationIds { org_ids })
    }
}
