//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the event read endpoints and the health checks
//! - **Schemas**: domain type wrappers ([`FeatureCollectionSchema`],
//!   [`FeatureSchema`], [`OrganizationIdsSchema`]) that describe the payloads
//!   without coupling domain types to utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{FeatureCollectionSchema, FeatureSchema, OrganizationIdsSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Planet events API",
        description = "Read access to ingested event footprints, plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::events::get_collection,
        crate::inbound::http::events::get_organization_ids,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(FeatureCollectionSchema, FeatureSchema, OrganizationIdsSchema)),
    tags(
        (name = "events", description = "Aggregated views over stored events"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
