//! Result rows and where they go.
//!
//! ```text
//! Refcode,dimensionality,number in gcd file
//! CUCHAIN,1D chain,1
//! CO2MOL,no polymeric bonds detected,2
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::driver::RowOutcome;
use crate::error::BatchError;

pub const CSV_HEADER: &str = "Refcode,dimensionality,number in gcd file";

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub identifier: String,
    pub outcome: RowOutcome,
    /// 1-based position of the identifier in the input list.
    pub sequence: usize,
}

/// Receives rows in input order.
pub trait ResultSink {
    fn record(&mut self, row: &ResultRow) -> Result<(), BatchError>;
}

impl ResultSink for Vec<ResultRow> {
    fn record(&mut self, row: &ResultRow) -> Result<(), BatchError> {
        self.push(row.clone());
        Ok(())
    }
}

/// CSV writer that flushes after every row.
pub struct CsvSink<W: Write> {
    writer: W,
    target: String,
}

impl CsvSink<BufWriter<File>> {
    /// Create (truncate) `path` and write the header.
    pub fn create(path: &Path) -> Result<Self, BatchError> {
        let target = path.display().to_string();
        let file = File::create(path).map_err(|source| BatchError::Write {
            target: target.clone(),
            source,
        })?;
        Self::new(BufWriter::new(file), target)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, target: impl Into<String>) -> Result<Self, BatchError> {
        let mut sink = Self { writer, target: target.into() };
        let io = writeln!(sink.writer, "{CSV_HEADER}").and_then(|_| sink.writer.flush());
        io.map_err(|source| sink.write_error(source))?;
        Ok(sink)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_error(&self, source: std::io::Error) -> BatchError {
        BatchError::Write { target: self.target.clone(), source }
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn record(&mut self, row: &ResultRow) -> Result<(), BatchError> {
        let io = writeln!(
            self.writer,
            "{},{},{}",
            csv_field(&row.identifier),
            csv_field(row.outcome.text()),
            row.sequence,
        )
        .and_then(|_| self.writer.flush());
        io.map_err(|source| self.write_error(source))
    }
}

/// Quote `field` if it contains a comma, quote or line break.
pub fn csv_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}

/// `path` with `.csv` appended when it has no extension.
pub fn csv_output_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_os_string();
        s.push(".csv");
        PathBuf::from(s)
    }
}
