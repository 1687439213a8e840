//! Diesel table definition for the event table.
//!
//! The table predates this service and has no primary key; `org_id` is
//! declared as one only because `table!` requires it. Nothing here relies on
//! its uniqueness.

diesel::table! {
    /// Ingested events: one row per accepted input record.
    #[sql_name = "data"]
    events (org_id) {
        /// Organization the event belongs to.
        org_id -> Nullable<Int4>,
        /// GeoJSON feature describing the footprint.
        footprints_used -> Nullable<Jsonb>,
        /// When the event happened, stored in UTC.
        source_event_timestamp -> Nullable<Timestamptz>,
    }
}

/// DDL creating the event table when it is missing.
pub(crate) const CREATE_EVENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS data (
    org_id Int,
    footprints_used JSONB,
    source_event_timestamp timestamptz
)";

/// Distinct organizations whose footprint is present and not JSON `null`.
pub(crate) const DISTINCT_ORG_IDS: &str = "SELECT DISTINCT org_id FROM data \
     WHERE footprints_used IS NOT NULL AND jsonb_typeof(footprints_used) != 'null'";
