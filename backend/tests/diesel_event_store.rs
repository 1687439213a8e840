//! Integration tests for `DieselEventStore` against embedded PostgreSQL.
//!
//! Each test gets a fresh database whose only table comes from the store's
//! own `create_schema`, so the statements under test are the ones the
//! binaries send.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_types::{Int4, Timestamptz};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use planet::domain::ports::{EventStore, EventStoreError};
use planet::domain::{BatchLoader, BatchSize, RawRecord};
use planet::outbound::CsvRecordSource;
use planet::outbound::persistence::{DbPool, DieselEventStore, PoolConfig};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::cluster::{fresh_database_url, handle_cluster_setup_failure};

const FEATURE: &str = concat!(
    r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[4.9,52.4]},"#,
    r#""properties":{"site":"dock"}}"#
);
const STAMP: &str = "2025-02-09T15:04:05Z";

#[derive(QueryableByName)]
struct StoredEvent {
    #[diesel(sql_type = Int4)]
    org_id: i32,
    #[diesel(sql_type = Timestamptz)]
    source_event_timestamp: DateTime<Utc>,
}

struct TestContext {
    runtime: Runtime,
    store: DieselEventStore,
    database_url: String,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    /// Run one raw statement on a dedicated connection.
    fn run_sql(&self, sql: &str) {
        self.block_on(async {
            let mut conn = AsyncPgConnection::establish(&self.database_url)
                .await
                .expect("connect for setup");
            diesel_async::RunQueryDsl::execute(diesel::sql_query(sql), &mut conn)
                .await
                .expect("setup statement");
        });
    }

    fn stored_events(&self) -> Vec<StoredEvent> {
        self.block_on(async {
            let mut conn = AsyncPgConnection::establish(&self.database_url)
                .await
                .expect("connect for readback");
            diesel_async::RunQueryDsl::load(
                diesel::sql_query(
                    "SELECT org_id, source_event_timestamp FROM data ORDER BY org_id",
                ),
                &mut conn,
            )
            .await
            .expect("read stored events")
        })
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database_url = fresh_database_url()?;
    let store = runtime
        .block_on(async {
            let pool = DbPool::connect_lazy(PoolConfig::single(database_url.as_str()));
            let store = DieselEventStore::new(pool);
            store.create_schema().await?;
            Ok::<_, EventStoreError>(store)
        })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        store,
        database_url,
    })
}

#[fixture]
fn store_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn record(line: u64, org_id: &str, footprint: &str, timestamp: &str) -> RawRecord {
    RawRecord::new(line, [org_id, footprint, timestamp])
}

#[rstest]
fn create_schema_is_idempotent(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    context
        .block_on(context.store.create_schema())
        .expect("second create");
}

#[rstest]
fn inserted_batch_is_readable(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    let records = vec![
        record(2, "1", FEATURE, STAMP),
        record(3, "2", FEATURE, "2025-02-09T16:04:05+01:00"),
        record(4, "1", FEATURE, STAMP),
    ];

    let inserted = context
        .block_on(context.store.insert_batch(&records))
        .expect("insert");
    let collection = context
        .block_on(context.store.feature_collection())
        .expect("collection");
    let mut ids = context
        .block_on(context.store.distinct_org_ids())
        .expect("ids");
    ids.sort_unstable();

    assert_eq!(inserted, 3);
    assert_eq!(collection.len(), 3);
    assert_eq!(ids, vec![1, 2]);
}

#[rstest]
fn timestamps_are_stored_as_utc_instants(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    let records = vec![
        record(2, "1", FEATURE, "2025-02-09T17:04:05+02:00"),
        record(3, "2", FEATURE, "2025-02-09T15:04:05Z"),
    ];

    context
        .block_on(context.store.insert_batch(&records))
        .expect("insert");
    let stored = context.stored_events();

    let expected: DateTime<Utc> = STAMP.parse().expect("utc stamp");
    assert_eq!(stored.len(), 2);
    assert!(
        stored
            .iter()
            .all(|event| event.source_event_timestamp == expected),
        "both offsets denote the same instant"
    );
    assert_eq!(stored[0].org_id, 1);
}

#[rstest]
fn bad_timestamps_are_dropped_before_insert(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    let records = vec![
        record(2, "1", FEATURE, "never"),
        record(3, "2", FEATURE, STAMP),
    ];

    let inserted = context
        .block_on(context.store.insert_batch(&records))
        .expect("insert");

    assert_eq!(inserted, 1);
    assert_eq!(
        context
            .block_on(context.store.distinct_org_ids())
            .expect("ids"),
        vec![2]
    );
}

#[rstest]
fn batch_with_unstorable_record_writes_nothing(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    let records = vec![record(2, "1", FEATURE, STAMP), record(3, "x", FEATURE, STAMP)];

    let error = context
        .block_on(context.store.insert_batch(&records))
        .expect_err("batch rejected");

    assert!(matches!(error, EventStoreError::InvalidRecord { line: 3, .. }));
    assert!(context.stored_events().is_empty());
}

#[rstest]
fn null_footprints_are_excluded_from_reads(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    context.run_sql(concat!(
        "INSERT INTO data (org_id, footprints_used, source_event_timestamp) VALUES ",
        "(5, NULL, now()), (6, 'null'::jsonb, now()), ",
        "(7, '{\"type\":\"Point\"}'::jsonb, now())"
    ));

    let collection = context
        .block_on(context.store.feature_collection())
        .expect("collection");
    let ids = context
        .block_on(context.store.distinct_org_ids())
        .expect("ids");

    assert!(collection.is_empty());
    assert_eq!(ids, vec![7]);
}

#[rstest]
fn null_org_id_fails_the_listing(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    context.run_sql(&format!(
        "INSERT INTO data (org_id, footprints_used, source_event_timestamp) VALUES \
         (NULL, '{FEATURE}'::jsonb, now())"
    ));

    let error = context
        .block_on(context.store.distinct_org_ids())
        .expect_err("null id");

    assert_eq!(error, EventStoreError::query("organization id is null"));
}

#[rstest]
fn csv_file_round_trips_through_the_loader(store_context: Option<TestContext>) {
    let Some(context) = store_context else {
        return;
    };
    let quoted = FEATURE.replace('"', "\"\"");
    let csv = format!(
        "org_id,footprints_used,source_event_timestamp\n\
         11,\"{quoted}\",{STAMP}\n\
         12,\"{quoted}\",garbage\n\
         11,\"{quoted}\",{STAMP}\n"
    );
    let mut source = CsvRecordSource::new(csv.as_bytes());
    let store = Arc::new(context.store.clone());
    let loader = BatchLoader::with_tracing(store.clone());

    let summary = context
        .block_on(loader.load(&mut source, BatchSize::default()))
        .expect("load");

    assert_eq!(summary.rows_inserted, 2);
    assert_eq!(summary.records_rejected, 1);
    assert_eq!(
        context.block_on(store.distinct_org_ids()).expect("ids"),
        vec![11]
    );
}
