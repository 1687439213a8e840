//! Runtime settings loaded via OrthoConfig.
//!
//! Each struct reads one environment prefix (`API_`, `POSTGRES_`,
//! `LOADER_`). Every field carries a default, so an empty environment
//! still yields a complete document.

mod api;
mod database;
mod loader;

pub use api::{ApiSettings, DeploymentEnv};
pub use database::DatabaseSettings;
pub use loader::{LoaderSettings, LoaderSettingsError, MAX_BATCH_SIZE};
