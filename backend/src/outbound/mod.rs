//! Outbound adapters implementing the domain's driven ports.
//!
//! - [`persistence`]: PostgreSQL event store via Diesel.
//! - [`csv_source`]: CSV record source for the loader.

pub mod csv_source;
pub mod persistence;

pub use csv_source::CsvRecordSource;
