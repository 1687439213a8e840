//! Domain primitives, ports and services.
//!
//! Purpose: define the event records read from input files, the validation
//! that gates them, the batch loader writing them through the
//! [`ports::EventStore`] port, and the read-side aggregation served over HTTP.
//! Adapters live in `inbound` and `outbound`; nothing here touches a socket
//! or a database directly.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - RawRecord / check_record: input rows and their validator.
//! - Feature / FeatureCollection: GeoJSON values returned by the read path.
//! - BatchLoader / BatchSize / LoadSummary: the ingestion pass.
//! - IngestionObserver: sink for per-record and per-batch diagnostics.
//! - EventsQueryService: implementation of [`ports::EventsQuery`].

pub mod error;
pub mod events_query_service;
pub mod feature;
pub mod ingestion;
pub mod observer;
pub mod ports;
pub mod record;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::events_query_service::EventsQueryService;
pub use self::feature::{Feature, FeatureCollection, FeatureError};
pub use self::ingestion::{BatchLoader, BatchSize, LoadError, LoadSummary};
pub use self::observer::{
    IngestionEvent, IngestionObserver, RecordingIngestionObserver, TracingIngestionObserver,
};
pub use self::record::{
    FOOTPRINT_PREFIX, RECORD_ARITY, RawRecord, RecordRejection, check_record, is_valid_record,
    parse_timestamp,
};
pub use self::trace_id::TraceId;
