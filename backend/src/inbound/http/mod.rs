//! HTTP inbound adapter exposing the read endpoints and health checks.

pub mod error;
pub mod events;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
