//! Structured diagnostics emitted while loading records.
//!
//! The loader reports every rejection, unreadable record and batch outcome to
//! an injected [`IngestionObserver`] instead of logging directly. Production
//! wiring uses [`TracingIngestionObserver`]; tests record the events.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::domain::RecordRejection;
use crate::domain::ingestion::LoadSummary;
use crate::domain::ports::{EventStoreError, RecordSourceError};

/// One diagnostic event from a load.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestionEvent {
    /// A record failed validation and was dropped.
    RecordRejected {
        /// Source line of the record.
        line: u64,
        /// First rule the record broke.
        reason: RecordRejection,
    },
    /// A record could not be read and was skipped.
    RecordUnreadable {
        /// Reader error.
        error: RecordSourceError,
    },
    /// A batch was written.
    BatchFlushed {
        /// One-based batch number.
        batch: u64,
        /// Records handed to the store.
        submitted: usize,
        /// Rows the store reported as inserted.
        inserted: usize,
    },
    /// A batch write failed; its records are lost for this run.
    BatchFailed {
        /// One-based batch number.
        batch: u64,
        /// Records handed to the store.
        submitted: usize,
        /// Store error.
        error: EventStoreError,
    },
    /// The source was exhausted and every batch flushed.
    LoadCompleted {
        /// Final counters.
        summary: LoadSummary,
    },
}

/// Sink for ingestion diagnostics.
pub trait IngestionObserver: Send + Sync {
    /// Receive one event.
    fn observe(&self, event: IngestionEvent);
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIngestionObserver;

impl IngestionObserver for TracingIngestionObserver {
    fn observe(&self, event: IngestionEvent) {
        match event {
            IngestionEvent::RecordRejected { line, reason } => {
                debug!(line, %reason, "record rejected");
            }
            IngestionEvent::RecordUnreadable { error } => {
                warn!(%error, "skipping unreadable record");
            }
            IngestionEvent::BatchFlushed {
                batch,
                submitted,
                inserted,
            } => {
                debug!(batch, submitted, inserted, "batch flushed");
            }
            IngestionEvent::BatchFailed {
                batch,
                submitted,
                error,
            } => {
                warn!(batch, submitted, %error, "batch insert failed");
            }
            IngestionEvent::LoadCompleted { summary } => {
                info!(
                    records_read = summary.records_read,
                    records_rejected = summary.records_rejected,
                    records_unreadable = summary.records_unreadable,
                    batches_flushed = summary.batches_flushed,
                    batches_failed = summary.batches_failed,
                    rows_inserted = summary.rows_inserted,
                    "event file loaded"
                );
            }
        }
    }
}

/// Observer that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingIngestionObserver {
    events: Mutex<Vec<IngestionEvent>>,
}

impl RecordingIngestionObserver {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, in order.
    pub fn events(&self) -> Vec<IngestionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Rejection reasons received so far, in order.
    pub fn rejections(&self) -> Vec<RecordRejection> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                IngestionEvent::RecordRejected { reason, .. } => Some(reason),
                _ => None,
            })
            .collect()
    }
}

impl IngestionObserver for RecordingIngestionObserver {
    fn observe(&self, event: IngestionEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
