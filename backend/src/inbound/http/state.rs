//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EventsQuery, FixtureEventsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub events: Arc<dyn EventsQuery>,
}

impl HttpState {
    /// Build state around the read-side port.
    pub fn new(events: Arc<dyn EventsQuery>) -> Self {
        Self { events }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureEventsQuery))
    }
}
