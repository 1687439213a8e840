//! Internal Diesel row structs for the event table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Int4, Nullable};

use super::schema::events;

/// Insertable row built from one validated record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow {
    pub org_id: i32,
    pub footprints_used: serde_json::Value,
    pub source_event_timestamp: DateTime<Utc>,
}

/// Row returned by the distinct organization id query.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct OrgIdRow {
    #[diesel(sql_type = Nullable<Int4>)]
    pub org_id: Option<i32>,
}
