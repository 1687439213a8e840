//! Driven port for reading raw records sequentially from an input stream.

use super::define_port_error;
use crate::domain::RawRecord;

define_port_error! {
    /// Errors raised while reading records.
    pub enum RecordSourceError {
        /// One record could not be decoded; the stream can continue.
        Malformed { line: u64, message: String } =>
            "malformed record on line {line}: {message}",
        /// The underlying stream failed; nothing more can be read.
        Io { message: String } =>
            "record source read failed: {message}",
    }
}

impl RecordSourceError {
    /// Whether reading may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Sequential source of raw records.
///
/// The first record of a source is a header; callers decide whether to skip
/// it.
#[cfg_attr(test, mockall::automock)]
pub trait RecordSource {
    /// Read the next record, or `Ok(None)` at end of stream.
    fn next_record(&mut self) -> Result<Option<RawRecord>, RecordSourceError>;
}

/// In-memory source yielding prepared results in order.
///
/// # Examples
/// ```
/// use planet::domain::ports::{FixtureRecordSource, RecordSource};
///
/// let mut source = FixtureRecordSource::from_rows([vec!["org_id", "footprint", "ts"]]);
/// assert!(source.next_record().unwrap().is_some());
/// assert!(source.next_record().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureRecordSource {
    items: std::collections::VecDeque<Result<RawRecord, RecordSourceError>>,
}

impl FixtureRecordSource {
    /// Source yielding the given results.
    pub fn new(items: impl IntoIterator<Item = Result<RawRecord, RecordSourceError>>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Source yielding one record per row, numbered from line 1.
    pub fn from_rows<R, F>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .zip(1_u64..)
                .map(|(fields, line)| Ok(RawRecord::new(line, fields))),
        )
    }
}

impl RecordSource for FixtureRecordSource {
    fn next_record(&mut self) -> Result<Option<RawRecord>, RecordSourceError> {
        self.items.pop_front().transpose()
    }
}
