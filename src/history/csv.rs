//! Minimal quoted-CSV record reader for history exports.
//!
//! Dialect:
//! - `,` separates fields, `"` quotes them
//! - quoted fields may contain commas and line breaks; `""` is a literal quote
//! - spaces/tabs right after a delimiter (or at row start) are skipped, so
//!   `a, "b, c"` yields `["a", "b, c"]`
//! - `\n` and `\r\n` both end a record
//!
//! Text following a closing quote is appended to the field, matching how
//! common spreadsheet exports are read back.

use std::iter::Peekable;
use std::str::Chars;

use super::HistoryError;

/// A parsed record and the line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    /// A line with nothing on it (or only whitespace).
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].is_empty()
    }
}

/// Iterator over the records of a CSV text. Blank lines are skipped.
pub struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    failed: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            chars: text.chars().peekable(),
            line: 1,
            failed: false,
        }
    }

    fn read_record(&mut self) -> Result<Record, HistoryError> {
        let start_line = self.line;
        let mut fields = Vec::new();

        loop {
            fields.push(self.read_field(start_line)?);

            match self.chars.next() {
                Some(',') => continue,
                Some('\r') => {
                    if self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    self.line += 1;
                    break;
                }
                Some('\n') => {
                    self.line += 1;
                    break;
                }
                // read_field only stops at a delimiter, line break or end of input
                _ => break,
            }
        }

        Ok(Record {
            line: start_line,
            fields,
        })
    }

    /// Read one field, leaving the terminating delimiter unconsumed.
    fn read_field(&mut self, start_line: usize) -> Result<String, HistoryError> {
        while matches!(self.chars.peek(), Some(' ' | '\t')) {
            self.chars.next();
        }

        let mut field = String::new();

        if self.chars.peek() == Some(&'"') {
            self.chars.next();
            loop {
                match self.chars.next() {
                    Some('"') => {
                        if self.chars.peek() == Some(&'"') {
                            self.chars.next();
                            field.push('"');
                        } else {
                            break;
                        }
                    }
                    Some(c) => {
                        if c == '\n' {
                            self.line += 1;
                        }
                        field.push(c);
                    }
                    None => return Err(HistoryError::UnterminatedQuote { row: start_line }),
                }
            }
        }

        while let Some(&c) = self.chars.peek() {
            if matches!(c, ',' | '\n' | '\r') {
                break;
            }
            field.push(c);
            self.chars.next();
        }

        Ok(field)
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<Record, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while self.chars.peek().is_some() {
            match self.read_record() {
                Ok(record) if record.is_blank() => continue,
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        None
    }
}
