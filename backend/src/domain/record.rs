//! Raw input records and the validator gating them before batching.
//!
//! Validation is a cheap syntactic pass: it checks arity, emptiness, the
//! footprint prefix and the timestamp format. It does not parse the footprint
//! as JSON; a malformed document sharing the prefix is caught later when the
//! batch is written.

use chrono::{DateTime, FixedOffset};

/// Number of fields in a well-formed record.
pub const RECORD_ARITY: usize = 3;

/// Literal prefix every footprint must start with.
pub const FOOTPRINT_PREFIX: &str = r#"{"type":"Feature""#;

/// One row read from the input stream, with its source line for diagnostics.
///
/// # Examples
/// ```
/// use planet::domain::RawRecord;
///
/// let record = RawRecord::new(2, ["1", r#"{"type":"Feature"}"#, "2025-02-09T15:04:05Z"]);
/// assert_eq!(record.organization_id(), Some("1"));
/// assert_eq!(record.line(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    line: u64,
    fields: Vec<String>,
}

impl RawRecord {
    /// Build a record from its fields.
    pub fn new<I, F>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Source line number (1-based, header included).
    pub fn line(&self) -> u64 {
        self.line
    }

    /// All fields in input order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// First field.
    pub fn organization_id(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    /// Second field.
    pub fn footprint(&self) -> Option<&str> {
        self.fields.get(1).map(String::as_str)
    }

    /// Third field.
    pub fn timestamp(&self) -> Option<&str> {
        self.fields.get(2).map(String::as_str)
    }
}

/// Reason a record was rejected, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordRejection {
    /// The record did not have exactly three fields.
    #[error("record must have exactly 3 fields, found {found}")]
    WrongArity {
        /// Field count seen.
        found: usize,
    },
    /// A field was empty once trimmed.
    #[error("field {index} must not be empty")]
    EmptyField {
        /// Zero-based field index.
        index: usize,
    },
    /// The footprint did not start with the feature prefix.
    #[error("footprint must start with {{\"type\":\"Feature\"")]
    FootprintPrefix,
    /// The timestamp was not RFC 3339.
    #[error("timestamp {value:?} is not RFC 3339")]
    Timestamp {
        /// Rejected value.
        value: String,
    },
}

/// Check a record against the validation rules, naming the first failure.
///
/// # Examples
/// ```
/// use planet::domain::{RecordRejection, check_record};
///
/// let fields = ["1", r#"{"type":"Point"}"#, "2025-02-09T15:04:05Z"];
/// assert_eq!(check_record(&fields), Err(RecordRejection::FootprintPrefix));
/// ```
pub fn check_record<S: AsRef<str>>(fields: &[S]) -> Result<(), RecordRejection> {
    let [_, footprint, timestamp] = fields else {
        return Err(RecordRejection::WrongArity {
            found: fields.len(),
        });
    };

    if let Some(index) = fields
        .iter()
        .position(|field| field.as_ref().trim().is_empty())
    {
        return Err(RecordRejection::EmptyField { index });
    }

    if !footprint.as_ref().starts_with(FOOTPRINT_PREFIX) {
        return Err(RecordRejection::FootprintPrefix);
    }

    if parse_timestamp(timestamp.as_ref()).is_none() {
        return Err(RecordRejection::Timestamp {
            value: timestamp.as_ref().to_owned(),
        });
    }

    Ok(())
}

/// Boolean form of [`check_record`].
pub fn is_valid_record<S: AsRef<str>>(fields: &[S]) -> bool {
    check_record(fields).is_ok()
}

/// Parse an RFC 3339 timestamp, keeping its offset.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}
