//! CSV-backed [`RecordSource`].
//!
//! The reader is configured with `has_headers(false)` so the header row is
//! delivered like any other record and skipped by the loader, and with
//! `flexible(true)` so rows of the wrong arity reach the validator instead of
//! failing the reader.
//!
//! A bare `"` inside an unquoted field is kept as a literal character rather
//! than rejected; such a row still fails later if the cell is not valid JSON.

use std::io::{self, Read};
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use csv::{Reader, ReaderBuilder, StringRecord};

use crate::domain::RawRecord;
use crate::domain::ports::{RecordSource, RecordSourceError};

/// Record source reading comma-separated rows.
pub struct CsvRecordSource<R> {
    reader: Reader<R>,
    record: StringRecord,
}

impl<R: Read> CsvRecordSource<R> {
    /// Wrap any byte stream.
    ///
    /// # Examples
    /// ```
    /// use planet::domain::ports::RecordSource;
    /// use planet::outbound::CsvRecordSource;
    ///
    /// let mut source = CsvRecordSource::new("org_id,footprint,ts\n".as_bytes());
    /// let header = source.next_record().unwrap().unwrap();
    /// assert_eq!(header.organization_id(), Some("org_id"));
    /// ```
    pub fn new(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        Self {
            reader,
            record: StringRecord::new(),
        }
    }
}

impl CsvRecordSource<std::fs::File> {
    /// Open the file at `path`.
    ///
    /// # Errors
    /// Returns an I/O error when the parent directory or the file cannot be
    /// opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "input path must be a file")
        })?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
            io::Error::new(
                error.kind(),
                format!("open input directory '{}': {error}", parent.display()),
            )
        })?;
        let file = directory.open(Path::new(file_name)).map_err(|error| {
            io::Error::new(
                error.kind(),
                format!("open input file '{}': {error}", path.display()),
            )
        })?;
        Ok(Self::new(file.into_std()))
    }
}

fn map_csv_error(error: csv::Error) -> RecordSourceError {
    if error.is_io_error() {
        return RecordSourceError::io(error.to_string());
    }
    let line = error.position().map_or(0, csv::Position::line);
    RecordSourceError::malformed(line, error.to_string())
}

impl<R: Read> RecordSource for CsvRecordSource<R> {
    fn next_record(&mut self) -> Result<Option<RawRecord>, RecordSourceError> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => Ok(None),
            Ok(true) => {
                let line = self.record.position().map_or(0, csv::Position::line);
                Ok(Some(RawRecord::new(line, self.record.iter())))
            }
            Err(error) => Err(map_csv_error(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read_all<R: Read>(
        source: &mut CsvRecordSource<R>,
    ) -> Vec<Result<RawRecord, RecordSourceError>> {
        let mut out = Vec::new();
        loop {
            match source.next_record() {
                Ok(Some(record)) => out.push(Ok(record)),
                Ok(None) => break,
                Err(error) => {
                    let fatal = !error.is_recoverable();
                    out.push(Err(error));
                    if fatal {
                        break;
                    }
                }
            }
        }
        out
    }

    #[rstest]
    fn quoted_json_fields_are_unescaped() {
        let input = concat!(
            "org_id,footprints_used,source_event_timestamp\n",
            "7,\"{\"\"type\"\":\"\"Feature\"\",\"\"geometry\"\":null}\",2025-02-09T15:04:05Z\n",
        );
        let mut source = CsvRecordSource::new(input.as_bytes());

        let records = read_all(&mut source);

        assert_eq!(records.len(), 2);
        let record = records[1].clone().expect("record");
        assert_eq!(record.line(), 2);
        assert_eq!(record.organization_id(), Some("7"));
        assert_eq!(record.footprint(), Some(r#"{"type":"Feature","geometry":null}"#));
        assert_eq!(record.timestamp(), Some("2025-02-09T15:04:05Z"));
    }

    #[rstest]
    fn bare_quotes_in_unquoted_fields_are_literal() {
        let mut source = CsvRecordSource::new("1,a\"b,c\n".as_bytes());
        let record = source.next_record().expect("read").expect("record");
        assert_eq!(record.fields(), ["1", "a\"b", "c"]);
    }

    #[rstest]
    #[case("a,b\n", 2)]
    #[case("a,b,c,d\n", 4)]
    #[case("a\n", 1)]
    fn rows_of_any_arity_are_delivered(#[case] input: &str, #[case] expected: usize) {
        let mut source = CsvRecordSource::new(input.as_bytes());
        let record = source.next_record().expect("read").expect("record");
        assert_eq!(record.fields().len(), expected);
    }

    #[rstest]
    fn invalid_utf8_is_recoverable() {
        let mut input = b"h1,h2,h3\n".to_vec();
        input.extend_from_slice(b"1,\xff\xfe,2025-02-09T15:04:05Z\n");
        input.extend_from_slice(b"2,x,y\n");
        let mut source = CsvRecordSource::new(input.as_slice());

        let records = read_all(&mut source);

        assert_eq!(records.len(), 3);
        let error = records[1].clone().expect_err("utf-8 error");
        assert!(error.is_recoverable());
        assert!(matches!(error, RecordSourceError::Malformed { line: 2, .. }));
        assert_eq!(
            records[2].clone().expect("record").organization_id(),
            Some("2")
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[rstest]
    fn stream_errors_are_fatal() {
        let mut source = CsvRecordSource::new(FailingReader);
        let error = source.next_record().expect_err("io error");
        assert!(!error.is_recoverable());
        assert!(matches!(error, RecordSourceError::Io { .. }));
    }

    #[rstest]
    fn open_reads_a_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "h1,h2,h3\n1,2,3\n").expect("write csv");

        let mut source = CsvRecordSource::open(&path).expect("open");

        assert_eq!(read_all(&mut source).len(), 2);
    }

    #[rstest]
    fn open_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = CsvRecordSource::open(&dir.path().join("absent.csv"))
            .err()
            .expect("missing file");
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
