//! Event footprint ingestion and read API.
//!
//! The loader binary streams CSV records through [`domain::BatchLoader`] into
//! PostgreSQL; the API binary serves the stored footprints over HTTP.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod telemetry;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
