//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod event_store;
mod events_query;
mod record_source;

#[cfg(test)]
pub use event_store::MockEventStore;
pub use event_store::{EventStore, EventStoreError, FixtureEventStore};
#[cfg(test)]
pub use events_query::MockEventsQuery;
pub use events_query::{EventsQuery, FixtureEventsQuery, OrganizationIds};
#[cfg(test)]
pub use record_source::MockRecordSource;
pub use record_source::{FixtureRecordSource, RecordSource, RecordSourceError};
