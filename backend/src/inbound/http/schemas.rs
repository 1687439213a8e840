//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror their serialized shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Feature`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Feature)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FeatureSchema {
    /// Always `Feature`.
    #[schema(example = "Feature")]
    r#type: String,
    /// Optional feature identifier.
    #[schema(value_type = Option<Object>)]
    id: Option<serde_json::Value>,
    /// Optional bounding box.
    bbox: Option<Vec<f64>>,
    /// GeoJSON geometry or `null`.
    #[schema(value_type = Option<Object>)]
    geometry: Option<serde_json::Value>,
    /// Free-form properties or `null`.
    #[schema(value_type = Option<Object>)]
    properties: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::FeatureCollection`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FeatureCollection)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FeatureCollectionSchema {
    /// Always `FeatureCollection`.
    #[schema(example = "FeatureCollection")]
    r#type: String,
    /// Stored footprints in store order.
    features: Vec<FeatureSchema>,
}

/// OpenAPI schema for [`crate::domain::ports::OrganizationIds`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::OrganizationIds)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrganizationIdsSchema {
    /// Distinct organization ids with a stored footprint.
    #[schema(example = json!([1, 2]))]
    org_ids: Vec<i32>,
}
