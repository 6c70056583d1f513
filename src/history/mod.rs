//! Streaming-history loading.
//!
//! The export is a quoted CSV with one header row. Column 0 holds the play
//! timestamp and column 4 the catalog track ID; every other column is ignored.
//!
//! [`load`] re-reads its [`HistorySource`] from the start on every call, so
//! the pipeline can walk the same history twice without sharing a cursor.

pub mod csv;

use std::collections::HashSet;
use std::path::PathBuf;

use crate::model::PlayEvent;
use csv::RecordReader;

/// Column holding the play timestamp.
pub const TIMESTAMP_COLUMN: usize = 0;
/// Column holding the catalog track ID.
pub const TRACK_ID_COLUMN: usize = 4;

/// Errors raised while reading the history export.
///
/// Any of these aborts the run; rows are never skipped.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to read history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed history row {row}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed history row {row}: unterminated quoted field")]
    UnterminatedQuote { row: usize },
}

/// Somewhere a history export can be read from, any number of times.
pub trait HistorySource {
    /// Read the complete export text.
    fn read_text(&self) -> Result<String, HistoryError>;
}

/// History export stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistorySource for FileSource {
    fn read_text(&self) -> Result<String, HistoryError> {
        std::fs::read_to_string(&self.path).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory export text.
impl HistorySource for str {
    fn read_text(&self) -> Result<String, HistoryError> {
        Ok(self.to_string())
    }
}

/// Parse every play event from the source, skipping the header row.
pub fn load<S: HistorySource + ?Sized>(source: &S) -> Result<Vec<PlayEvent>, HistoryError> {
    let text = source.read_text()?;
    let mut records = RecordReader::new(&text);

    // Header
    if let Some(header) = records.next() {
        header?;
    }

    let mut events = Vec::new();
    for record in records {
        let record = record?;
        let found = record.fields.len();
        if found <= TRACK_ID_COLUMN {
            return Err(HistoryError::MalformedRow {
                row: record.line,
                expected: TRACK_ID_COLUMN + 1,
                found,
            });
        }

        let mut fields = record.fields;
        events.push(PlayEvent {
            track_id: std::mem::take(&mut fields[TRACK_ID_COLUMN]),
            timestamp: std::mem::take(&mut fields[TIMESTAMP_COLUMN]),
        });
    }

    Ok(events)
}

/// Distinct track IDs in order of first appearance.
pub fn collect_track_ids(events: &[PlayEvent]) -> Vec<String> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|event| seen.insert(event.track_id.as_str()))
        .map(|event| event.track_id.clone())
        .collect()
}
