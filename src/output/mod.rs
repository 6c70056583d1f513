//! Enriched CSV output.
//!
//! Rows go to a [`RecordSink`]: [`AppendFileSink`] for real runs and
//! [`MemorySink`] for tests. The file sink only ever appends, so repeated
//! runs accumulate rows (and a header per run) in the same file.
//!
//! Text fields containing a comma are wrapped in double quotes. Quotes
//! already inside such a field are written as-is, not doubled.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::EnrichedRecord;

/// Header line written at the start of every run.
pub const HEADER: &str = "timestamp,artist_name,artist_id,album_name,album_id,track_name,track_id,track_date,date_precision,track_length,track_popularity,track_explicit";

/// Destination for output lines.
pub trait RecordSink {
    /// Write one line; the sink adds the line terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Appends lines to a file, creating it if needed.
///
/// The file is opened on the first write, so a run that fails before
/// producing output leaves the filesystem untouched.
pub struct AppendFileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl AppendFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => BufWriter::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            ),
        };
        Ok(self.writer.insert(writer))
    }
}

impl RecordSink for AppendFileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let writer = self.writer()?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl RecordSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// Write the header and one row per record. Returns the number of rows.
pub fn write_records<W: RecordSink + ?Sized>(
    records: &[EnrichedRecord],
    sink: &mut W,
) -> io::Result<usize> {
    sink.write_line(HEADER)?;
    for record in records {
        sink.write_line(&format_record(record))?;
    }
    sink.flush()?;
    Ok(records.len())
}

/// Render one record as a CSV line (without terminator), in [`HEADER`] order.
pub fn format_record(record: &EnrichedRecord) -> String {
    let m = &record.metadata;
    [
        escape_field(&record.timestamp),
        escape_field(&m.artist_name),
        escape_field(&m.artist_id),
        escape_field(&m.album_name),
        escape_field(&m.album_id),
        escape_field(&m.track_name),
        escape_field(&m.track_id),
        escape_field(&m.release_date),
        escape_field(&m.release_date_precision),
        m.duration_ms.to_string(),
        m.popularity.to_string(),
        format_bool(m.explicit).to_string(),
    ]
    .join(",")
}

/// Quote a text field if it contains the delimiter.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Booleans are written as `True`/`False`, matching existing output files.
fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
