//! Driving port for the read endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, FeatureCollection};

/// Distinct organization ids wrapped in their response shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationIds {
    /// Ids in store iteration order.
    pub org_ids: Vec<i32>,
}

/// Read use-cases consumed by the HTTP adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsQuery: Send + Sync {
    /// Every stored footprint that parses as a feature.
    async fn feature_collection(&self) -> Result<FeatureCollection, Error>;

    /// Distinct organization ids with a non-null footprint.
    async fn organization_ids(&self) -> Result<OrganizationIds, Error>;
}

/// Fixture query returning empty results.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEventsQuery;

#[async_trait]
impl EventsQuery for FixtureEventsQuery {
    async fn feature_collection(&self) -> Result<FeatureCollection, Error> {
        Ok(FeatureCollection::new())
    }

    async fn organization_ids(&self) -> Result<OrganizationIds, Error> {
        Ok(OrganizationIds::default())
    }
}
