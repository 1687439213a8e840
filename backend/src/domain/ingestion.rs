//! Batch loader: validates records from a source and flushes them to the
//! event store in fixed-size batches.
//!
//! The pass is strictly sequential. One header record is skipped, invalid and
//! unreadable records are reported and dropped, and a failed batch is reported
//! without stopping the load. Nothing is retried.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::domain::ports::{EventStore, RecordSource, RecordSourceError};
use crate::domain::{
    IngestionEvent, IngestionObserver, RawRecord, TracingIngestionObserver, check_record,
};

/// Number of valid records written per insert statement.
///
/// # Examples
/// ```
/// use planet::domain::BatchSize;
///
/// assert_eq!(BatchSize::new(50).map(BatchSize::get), Some(50));
/// assert!(BatchSize::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    /// Batch size used when none is configured.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(49));

    /// Wrap a positive size; zero is rejected.
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// The size as a plain integer.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Counters describing one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records read after the header, unreadable ones excluded.
    pub records_read: u64,
    /// Records dropped by validation.
    pub records_rejected: u64,
    /// Records the source could not decode.
    pub records_unreadable: u64,
    /// Batches written successfully.
    pub batches_flushed: u64,
    /// Batches the store rejected.
    pub batches_failed: u64,
    /// Valid records handed to the store.
    pub records_submitted: u64,
    /// Rows the store reported as inserted.
    pub rows_inserted: u64,
}

/// Fatal load failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The header record was missing or unreadable.
    #[error("failed to read header: {message}")]
    Header {
        /// What went wrong.
        message: String,
    },
    /// The stream failed after the header.
    #[error("record source failed: {0}")]
    Source(RecordSourceError),
}

/// Sequential loader writing validated records through an [`EventStore`].
pub struct BatchLoader<S: ?Sized> {
    store: Arc<S>,
    observer: Arc<dyn IngestionObserver>,
}

impl<S> BatchLoader<S>
where
    S: EventStore + ?Sized,
{
    /// Loader reporting to the given observer.
    pub fn new(store: Arc<S>, observer: Arc<dyn IngestionObserver>) -> Self {
        Self { store, observer }
    }

    /// Loader reporting through `tracing`.
    pub fn with_tracing(store: Arc<S>) -> Self {
        Self::new(store, Arc::new(TracingIngestionObserver))
    }

    /// Load every record of `source`, skipping its header.
    ///
    /// # Errors
    /// Returns [`LoadError::Header`] when the header cannot be read and
    /// [`LoadError::Source`] when the stream itself fails. Rejected records
    /// and failed batches are not errors; they are counted and reported.
    pub async fn load<R>(
        &self,
        source: &mut R,
        batch_size: BatchSize,
    ) -> Result<LoadSummary, LoadError>
    where
        R: RecordSource + ?Sized,
    {
        match source.next_record() {
            Ok(Some(_header)) => {}
            Ok(None) => {
                return Err(LoadError::Header {
                    message: "source is empty".to_owned(),
                });
            }
            Err(error) => {
                return Err(LoadError::Header {
                    message: error.to_string(),
                });
            }
        }

        let mut summary = LoadSummary::default();
        let mut batch: Vec<RawRecord> = Vec::with_capacity(batch_size.get());

        loop {
            let record = match source.next_record() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(error) if error.is_recoverable() => {
                    summary.records_unreadable += 1;
                    self.observer.observe(IngestionEvent::RecordUnreadable { error });
                    continue;
                }
                Err(error) => return Err(LoadError::Source(error)),
            };
            summary.records_read += 1;

            if let Err(reason) = check_record(record.fields()) {
                summary.records_rejected += 1;
                self.observer.observe(IngestionEvent::RecordRejected {
                    line: record.line(),
                    reason,
                });
                continue;
            }

            batch.push(record);
            if batch.len() >= batch_size.get() {
                self.flush(&mut batch, &mut summary).await;
            }
        }

        if !batch.is_empty() {
            self.flush(&mut batch, &mut summary).await;
        }

        self.observer.observe(IngestionEvent::LoadCompleted { summary });
        Ok(summary)
    }

    async fn flush(&self, batch: &mut Vec<RawRecord>, summary: &mut LoadSummary) {
        let number = summary.batches_flushed + summary.batches_failed + 1;
        let submitted = batch.len();
        summary.records_submitted += submitted as u64;

        match self.store.insert_batch(batch).await {
            Ok(inserted) => {
                summary.batches_flushed += 1;
                summary.rows_inserted += inserted as u64;
                self.observer.observe(IngestionEvent::BatchFlushed {
                    batch: number,
                    submitted,
                    inserted,
                });
            }
            Err(error) => {
                summary.batches_failed += 1;
                self.observer.observe(IngestionEvent::BatchFailed {
                    batch: number,
                    submitted,
                    error,
                });
            }
        }
        batch.clear();
    }
}

#[cfg(test)]
#[path = "ingestion_tests.rs"]
mod tests;
