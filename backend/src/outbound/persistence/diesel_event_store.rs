//! PostgreSQL-backed `EventStore` implementation using Diesel ORM.
//!
//! Writes go through one multi-row insert per batch. Reads are plain scans of
//! the event table with no ordering guarantee beyond what PostgreSQL returns.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{EventStore, EventStoreError};
use crate::domain::{Feature, FeatureCollection, RawRecord, parse_timestamp};

use super::models::{NewEventRow, OrgIdRow};
use super::pool::{DbPool, PoolError};
use super::schema::{CREATE_EVENTS_TABLE, DISTINCT_ORG_IDS, events};

/// Diesel-backed implementation of the [`EventStore`] port.
#[derive(Clone)]
pub struct DieselEventStore {
    pool: DbPool,
}

impl DieselEventStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventStoreError {
    EventStoreError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> EventStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let message = error.to_string();
    debug!(%message, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EventStoreError::connection(message)
        }
        _ => EventStoreError::query(message),
    }
}

/// Convert one validated record into an insertable row.
///
/// Returns `Ok(None)` when the timestamp does not parse; such records are
/// dropped from the batch. Fields the column types cannot hold fail the
/// whole batch.
fn to_row(record: &RawRecord) -> Result<Option<NewEventRow>, EventStoreError> {
    let line = record.line();
    let (Some(org_id), Some(footprint), Some(timestamp)) =
        (record.organization_id(), record.footprint(), record.timestamp())
    else {
        return Err(EventStoreError::invalid_record(
            line,
            format!("expected 3 fields, found {}", record.fields().len()),
        ));
    };

    let Some(timestamp) = parse_timestamp(timestamp) else {
        warn!(line, value = timestamp, "skipping record with invalid timestamp");
        return Ok(None);
    };

    let org_id = org_id.trim().parse::<i32>().map_err(|err| {
        EventStoreError::invalid_record(line, format!("organization id {org_id:?}: {err}"))
    })?;
    let footprints_used = serde_json::from_str(footprint).map_err(|err| {
        EventStoreError::invalid_record(line, format!("footprint is not valid JSON: {err}"))
    })?;

    Ok(Some(NewEventRow {
        org_id,
        footprints_used,
        source_event_timestamp: timestamp.with_timezone(&Utc),
    }))
}

fn to_rows(records: &[RawRecord]) -> Result<Vec<NewEventRow>, EventStoreError> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        if let Some(row) = to_row(record)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Parse stored footprints, skipping any that are missing or not features.
fn collect_features(footprints: Vec<Option<serde_json::Value>>) -> FeatureCollection {
    footprints
        .into_iter()
        .enumerate()
        .filter_map(|(index, footprint)| {
            let Some(value) = footprint else {
                warn!(index, "skipping row without footprint");
                return None;
            };
            match Feature::from_value(value) {
                Ok(feature) => Some(feature),
                Err(error) => {
                    warn!(index, %error, "skipping footprint that is not a feature");
                    None
                }
            }
        })
        .collect()
}

fn collect_org_ids(rows: Vec<OrgIdRow>) -> Result<Vec<i32>, EventStoreError> {
    rows.into_iter()
        .map(|row| {
            row.org_id
                .ok_or_else(|| EventStoreError::query("organization id is null"))
        })
        .collect()
}

#[async_trait]
impl EventStore for DieselEventStore {
    async fn create_schema(&self) -> Result<(), EventStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query(CREATE_EVENTS_TABLE)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn insert_batch(&self, records: &[RawRecord]) -> Result<usize, EventStoreError> {
        let rows = to_rows(records)?;
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(events::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn feature_collection(&self) -> Result<FeatureCollection, EventStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let footprints: Vec<Option<serde_json::Value>> = events::table
            .select(events::footprints_used)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(collect_features(footprints))
    }

    async fn distinct_org_ids(&self) -> Result<Vec<i32>, EventStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OrgIdRow> = diesel::sql_query(DISTINCT_ORG_IDS)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_org_ids(rows)
    }
}
