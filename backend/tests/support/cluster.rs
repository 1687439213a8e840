//! Embedded PostgreSQL for the persistence suites.
//!
//! Every test in a binary shares one cluster bootstrapped by
//! `pg-embed-setup-unpriv` and receives its own empty database on it, so
//! tests never see each other's rows. The library keeps the cluster alive for
//! the lifetime of the test process.
//!
//! A cluster that cannot start (no binaries, no network for the download)
//! skips the test with a `SKIP-TEST-CLUSTER` marker. Setting
//! `REQUIRE_TEST_CLUSTER` to a truthy value turns that into a failure.

use std::sync::Once;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use uuid::Uuid;

const STABLE_PASSWORD: &str = "planet_embedded_test";

static PASSWORD_INIT: Once = Once::new();

/// Whether a cluster bootstrap failure must fail the test run.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn cluster_is_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster that could not be prepared: skip, or panic when the
/// cluster is required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    assert!(
        !cluster_is_required(),
        "test cluster setup failed: {reason}"
    );
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

/// Create an empty, uniquely named database and return its URL.
pub fn fresh_database_url() -> Result<String, String> {
    ensure_stable_password();
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err}"))?;
    let name = format!("planet_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    Ok(cluster.connection().database_url(&name))
}

// An existing data directory keeps the password it was initialised with, so
// the bootstrap must not pick a random one on later runs.
fn ensure_stable_password() {
    PASSWORD_INIT.call_once(|| {
        if std::env::var_os("PG_PASSWORD").is_none() {
            // SAFETY: runs once, before the first bootstrap reads the
            // environment; no other test code writes `PG_PASSWORD`.
            unsafe {
                std::env::set_var("PG_PASSWORD", STABLE_PASSWORD);
            }
        }
    });
}
